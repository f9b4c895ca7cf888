//! Error types for the club service

use thiserror::Error;

/// Result type alias for the club service
pub type Result<T> = std::result::Result<T, ClubError>;

/// Main error type for the club service
#[derive(Error, Debug)]
pub enum ClubError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed request data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, invalid or expired credentials
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Role or club ownership check failed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violations
    #[error("Conflict: {0}")]
    Conflict(String),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
