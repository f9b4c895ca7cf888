//! Core JWT handler implementation

use super::types::{Claims, IssuedToken, JwtHandler, TokenType};
use crate::config::AuthConfig;
use crate::core::models::User;
use crate::utils::error::{ClubError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
            issuer: config.issuer.clone(),
        }
    }

    fn now() -> Result<u64> {
        Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ClubError::internal(format!("System time error: {}", e)))?
            .as_secs())
    }

    fn issue(&self, user: &User, token_type: TokenType) -> Result<IssuedToken> {
        let now = Self::now()?;
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user.id,
            iat: now,
            exp: now + ttl,
            iss: self.issuer.clone(),
            aud: token_type.audience().to_string(),
            jti: Uuid::new_v4().to_string(),
            role: user.role,
            club_id: user.club_id,
            token_type,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(ClubError::Jwt)?;

        debug!("Created {:?} token for user: {}", token_type, user.id);
        Ok(IssuedToken { token, claims })
    }

    /// Create an access token carrying the user's role and club
    pub fn create_access_token(&self, user: &User) -> Result<IssuedToken> {
        self.issue(user, TokenType::Access)
    }

    /// Create a refresh token; its `jti` must be persisted by the caller
    pub fn create_refresh_token(&self, user: &User) -> Result<IssuedToken> {
        self.issue(user, TokenType::Refresh)
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[expected.audience()]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            ClubError::Jwt(e)
        })?;

        if token_data.claims.token_type != expected {
            return Err(ClubError::unauthenticated("Invalid token type"));
        }

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Verify signature, expiry, issuer and audience of an access token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        self.verify(token, TokenType::Access)
    }

    /// Verify a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        self.verify(token, TokenType::Refresh)
    }

    /// Access token lifetime in seconds
    pub fn access_ttl(&self) -> u64 {
        self.access_ttl
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_ttl(&self) -> u64 {
        self.refresh_ttl
    }
}
