//! Session lifecycle: login, refresh, logout and password change

use super::jwt::{Claims, JwtHandler};
use super::types::Session;
use crate::config::AuthConfig;
use crate::core::models::{NewMember, Role, User};
use crate::storage::StorageLayer;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::error::{ClubError, Result};
use crate::utils::validation::FieldValidator;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH: &str = "Invalid or expired refresh token";

/// A signed session whose refresh token is not yet stored
struct MintedSession {
    jti: String,
    expires_at: DateTime<Utc>,
    session: Session,
}

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage layer for user data
    storage: Arc<StorageLayer>,
    /// JWT handler
    jwt: Arc<JwtHandler>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Self {
        info!("Initializing authentication system");

        Self {
            jwt: Arc::new(JwtHandler::new(config)),
            config: Arc::new(config.clone()),
            storage,
        }
    }

    /// Authentication configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// JWT handler
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Check an email/password pair against the credential store
    async fn check_credentials(&self, email: &str, password: &str) -> Result<User> {
        let Ok(email) = FieldValidator::normalize_email(email) else {
            return Err(ClubError::unauthenticated(INVALID_CREDENTIALS));
        };

        let Some(user) = self.storage.db().find_user_by_email(&email).await? else {
            debug!("Login attempt for unknown email");
            return Err(ClubError::unauthenticated(INVALID_CREDENTIALS));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Failed password check for user {}", user.id);
            return Err(ClubError::unauthenticated(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    /// Sign a new token pair for `user` without touching storage
    fn mint_session(&self, user: User) -> Result<MintedSession> {
        let access = self.jwt.create_access_token(&user)?;
        let refresh = self.jwt.create_refresh_token(&user)?;

        let expires_at = Utc
            .timestamp_opt(refresh.claims.exp as i64, 0)
            .single()
            .ok_or_else(|| ClubError::internal("Refresh expiry out of range"))?;

        Ok(MintedSession {
            jti: refresh.claims.jti,
            expires_at,
            session: Session {
                access_token: access.token,
                refresh_token: refresh.token,
                user,
            },
        })
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let user = self.check_credentials(email, password).await?;
        let minted = self.mint_session(user)?;

        self.storage
            .db()
            .store_refresh_token(&minted.jti, minted.session.user.id, minted.expires_at)
            .await?;

        info!("User {} logged in", minted.session.user.id);
        Ok(minted.session)
    }

    /// Exchange a refresh token for a new session, consuming the old token
    ///
    /// The old token is consumed and the new one stored in one transaction,
    /// so a storage failure leaves the presented token usable.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        let claims = self
            .jwt
            .verify_refresh_token(refresh_token)
            .map_err(|_| ClubError::unauthenticated(INVALID_REFRESH))?;

        // Reload so role or club changes apply to the new access token
        let user = self
            .storage
            .db()
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| ClubError::unauthenticated(INVALID_REFRESH))?;

        let minted = self.mint_session(user)?;
        let rotated = self
            .storage
            .db()
            .rotate_refresh_token(&claims.jti, claims.sub, &minted.jti, minted.expires_at)
            .await?;

        if !rotated {
            warn!("Rejected reused or revoked refresh token for user {}", claims.sub);
            return Err(ClubError::unauthenticated(INVALID_REFRESH));
        }

        debug!("Refreshed session for user {}", claims.sub);
        Ok(minted.session)
    }

    /// Revoke a refresh token; invalid tokens are ignored
    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<()> {
        let Some(token) = refresh_token else {
            return Ok(());
        };

        match self.jwt.verify_refresh_token(token) {
            Ok(claims) => {
                self.storage.db().revoke_refresh_token(&claims.jti).await?;
                info!("User {} logged out", claims.sub);
            }
            Err(e) => debug!("Ignoring invalid refresh token on logout: {}", e),
        }
        Ok(())
    }

    /// Change a password, proving identity with the current one
    ///
    /// All refresh tokens of the user are revoked on success.
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        FieldValidator::validate_password(new_password)?;

        let user = self.check_credentials(email, old_password).await?;
        let password_hash = hash_password(new_password)?;

        let revoked = self
            .storage
            .db()
            .change_password_revoking_sessions(user.id, &password_hash)
            .await?;

        info!(
            "Password changed for user {}; {} refresh tokens revoked",
            user.id, revoked
        );
        Ok(())
    }

    /// Create a super-administrator account with no club
    pub async fn create_super_admin(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let name = FieldValidator::required("name", Some(name))?;
        let email = FieldValidator::normalize_email(email)?;
        FieldValidator::validate_password(password)?;

        let user = self
            .storage
            .db()
            .create_member(NewMember {
                name,
                email,
                phone: None,
                role: Role::SuperAdmin,
                club_id: None,
                password_hash: hash_password(password)?,
            })
            .await?;

        info!("Created super administrator {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Verify a bearer access token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        self.jwt
            .verify_access_token(token)
            .map_err(|_| ClubError::unauthenticated("Invalid or expired token"))
    }
}
