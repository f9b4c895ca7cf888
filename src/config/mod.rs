//! Configuration management for the club service
//!
//! Configuration is read from a YAML file, then selected values are
//! overridden from the environment and the result is validated.

pub mod models;

pub use models::*;

use crate::utils::error::{ClubError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the club service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClubError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from a YAML document without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ClubError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load the file if it exists, apply environment overrides and validate
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            info!("Loading configuration from: {:?}", path);
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                ClubError::Config(format!("Failed to read config file: {}", e))
            })?;
            Self::from_yaml(&content)?
        } else {
            warn!(
                "Config file {:?} not found, using defaults and environment",
                path
            );
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override values from environment variables
    ///
    /// `lookup` abstracts the environment so overrides can be exercised in tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CLUBS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CLUBS_PORT") {
            self.server.port = parse_env("CLUBS_PORT", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.storage.database.max_connections = parse_env("DATABASE_MAX_CONNECTIONS", &max)?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("ACCESS_TOKEN_TTL") {
            self.auth.access_token_ttl = parse_env("ACCESS_TOKEN_TTL", &ttl)?;
        }
        if let Some(ttl) = lookup("REFRESH_TOKEN_TTL") {
            self.auth.refresh_token_ttl = parse_env("REFRESH_TOKEN_TTL", &ttl)?;
        }
        if let Some(secure) = lookup("COOKIE_SECURE") {
            self.auth.refresh_cookie.secure = parse_env("COOKIE_SECURE", &secure)?;
        }
        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| ClubError::Config(format!("Server config error: {}", e)))?;

        self.storage
            .database
            .validate()
            .map_err(|e| ClubError::Config(format!("Database config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| ClubError::Config(format!("Auth config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ClubError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ClubError::Config(format!("Invalid value for {}: {:?}", key, value)))
}
