//! Token refresh endpoint

use super::cookies::{refresh_cookie, removal_cookie};
use super::models::TokenResponse;
use crate::server::state::AppState;
use crate::utils::error::ClubError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use tracing::warn;

/// Rotate the refresh cookie and issue a new access token
///
/// Client failures clear the cookie so the browser stops presenting it.
pub async fn refresh(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let config = state.auth.config();

    let result = match req.cookie(&config.refresh_cookie.name) {
        Some(cookie) => state.auth.refresh(cookie.value()).await,
        None => Err(ClubError::unauthenticated("Refresh token missing")),
    };

    match result {
        Ok(session) => HttpResponse::Ok()
            .cookie(refresh_cookie(config, session.refresh_token))
            .json(TokenResponse {
                access_token: session.access_token,
            }),
        Err(e) => {
            let mut response = e.error_response();
            if e.is_client_error() {
                if let Err(err) = response.add_cookie(&removal_cookie(config)) {
                    warn!("Failed to clear refresh cookie: {}", err);
                }
            }
            response
        }
    }
}
