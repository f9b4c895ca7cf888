//! Error handling for the club service
//!
//! This module defines the error taxonomy used throughout the crate and how
//! each kind is rendered to HTTP clients.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::ErrorResponse;
pub use types::{ClubError, Result};
