//! JWT token handling
//!
//! This module provides access and refresh token creation and verification.

mod handler;
pub mod types;


pub use types::{Claims, IssuedToken, JwtHandler, TokenType};
