//! Authentication configuration

use super::*;
use crate::utils::crypto::generate_secret;
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign access and refresh tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl: u64,
    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl: u64,
    /// Token issuer
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Refresh cookie settings
    #[serde(default)]
    pub refresh_cookie: RefreshCookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl: default_refresh_token_ttl(),
            issuer: default_issuer(),
            refresh_cookie: RefreshCookieConfig::default(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("issuer", &self.issuer)
            .field("refresh_cookie", &self.refresh_cookie)
            .finish()
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err("JWT secret must not use a placeholder value".to_string());
        }

        if !(60..=86400).contains(&self.access_token_ttl) {
            return Err(
                "Access token TTL must be between 60 seconds and 24 hours".to_string(),
            );
        }
        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err("Refresh token TTL must exceed the access token TTL".to_string());
        }
        if self.refresh_token_ttl > 90 * 86400 {
            return Err("Refresh token TTL must not exceed 90 days".to_string());
        }

        if self.issuer.trim().is_empty() {
            return Err("Token issuer cannot be empty".to_string());
        }

        self.refresh_cookie.validate()
    }
}

/// SameSite attribute for the refresh cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    #[default]
    Strict,
    Lax,
    None,
}

/// Refresh cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshCookieConfig {
    /// Cookie name
    #[serde(default = "default_cookie_name")]
    pub name: String,
    /// Cookie path
    #[serde(default = "default_cookie_path")]
    pub path: String,
    /// Only send the cookie over HTTPS
    #[serde(default)]
    pub secure: bool,
    /// SameSite policy
    #[serde(default)]
    pub same_site: SameSitePolicy,
}

impl Default for RefreshCookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            path: default_cookie_path(),
            secure: false,
            same_site: SameSitePolicy::default(),
        }
    }
}

impl RefreshCookieConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Refresh cookie name cannot be empty".to_string());
        }
        if !self.path.starts_with('/') {
            return Err("Refresh cookie path must start with '/'".to_string());
        }
        // Browsers drop SameSite=None cookies that are not Secure
        if self.same_site == SameSitePolicy::None && !self.secure {
            return Err("SameSite=None requires a secure refresh cookie".to_string());
        }
        Ok(())
    }
}

fn default_jwt_secret() -> String {
    generate_secret(64)
}

fn default_cookie_name() -> String {
    "refresh_token".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}
