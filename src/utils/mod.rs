//! Shared utilities: errors, password crypto and request validation

pub mod crypto;
pub mod error;
pub mod validation;
