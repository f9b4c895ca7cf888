//! Logout endpoint

use super::cookies::removal_cookie;
use super::models::MessageResponse;
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::error;

/// Revoke the presented refresh token and clear the cookie
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let config = state.auth.config();
    let cookie = req.cookie(&config.refresh_cookie.name);

    if let Err(e) = state.auth.logout(cookie.as_ref().map(|c| c.value())).await {
        error!("Failed to revoke refresh token on logout: {}", e);
    }

    HttpResponse::Ok()
        .cookie(removal_cookie(config))
        .json(MessageResponse::new("Logged out"))
}
