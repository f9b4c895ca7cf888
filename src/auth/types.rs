//! Authentication types

use crate::core::models::User;

/// Tokens minted for a signed-in user
#[derive(Debug, Clone)]
pub struct Session {
    /// Access token returned in the response body
    pub access_token: String,
    /// Refresh token delivered only as an HTTP-only cookie
    pub refresh_token: String,
    /// User the session belongs to
    pub user: User,
}
