//! Login endpoint

use super::cookies::refresh_cookie;
use super::models::{LoginRequest, TokenResponse};
use crate::server::state::AppState;
use crate::utils::error::{ClubError, Result};
use crate::utils::validation::FieldValidator;
use actix_web::{HttpResponse, web};
use tracing::info;

/// Exchange email and password for an access token and a refresh cookie
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let email = FieldValidator::required("email", request.email.as_deref())?;
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ClubError::validation("password is required"))?;

    info!("Login attempt: {}", email);

    let session = state.auth.login(&email, password).await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(state.auth.config(), session.refresh_token))
        .json(TokenResponse {
            access_token: session.access_token,
        }))
}
