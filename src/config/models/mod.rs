//! Configuration data models
//!
//! This module defines all configuration structures used by the club service.

#![allow(missing_docs)]

pub mod auth;
pub mod server;
pub mod storage;

pub use auth::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3001
}

/// Default database URL
pub fn default_database_url() -> String {
    "sqlite://data/clubs.db?mode=rwc".to_string()
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default access token lifetime in seconds
pub fn default_access_token_ttl() -> u64 {
    15 * 60
}

/// Default refresh token lifetime in seconds
pub fn default_refresh_token_ttl() -> u64 {
    7 * 24 * 3600
}

/// Default token issuer
pub fn default_issuer() -> String {
    "campus-clubs".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
