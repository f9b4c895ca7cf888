//! Authentication and authorization
//!
//! Token issue/verification lives in [`jwt`], the authorization guard in
//! [`rbac`], and the session lifecycle in [`AuthSystem`].

pub mod jwt;
pub mod rbac;
mod system;
mod types;

pub use system::AuthSystem;
pub use types::Session;
