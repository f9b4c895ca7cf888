//! Request authentication
//!
//! Bearer access tokens are resolved into a [`Caller`] extractor; handlers
//! then ask the caller to satisfy an RBAC [`Action`](crate::auth::rbac::Action).

mod auth;
mod helpers;


pub use auth::Caller;
pub use helpers::bearer_token;
