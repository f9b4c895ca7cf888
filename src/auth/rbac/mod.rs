//! Role-Based Access Control (RBAC)
//!
//! Every guarded operation is an [`Action`] with a declarative [`Policy`];
//! [`authorize`] is the single decision function evaluated against it.

mod policy;
mod types;

pub use policy::authorize;
pub use types::{Action, Decision, DenyReason, Policy, Scope};
