//! Password change endpoint

use super::cookies::removal_cookie;
use super::models::{ChangePasswordRequest, MessageResponse};
use crate::server::state::AppState;
use crate::utils::error::{ClubError, Result};
use crate::utils::validation::FieldValidator;
use actix_web::{HttpResponse, web};

fn required_secret<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ClubError::validation(format!("{} is required", field)))
}

/// Change a password; every refresh token of the account is revoked
pub async fn change_password(
    state: web::Data<AppState>,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    let email = FieldValidator::required("email", request.email.as_deref())?;
    let old_password = required_secret("oldPassword", request.old_password.as_deref())?;
    let new_password = required_secret("newPassword", request.new_password.as_deref())?;

    state
        .auth
        .change_password(&email, old_password, new_password)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(state.auth.config()))
        .json(MessageResponse::new("Password changed successfully")))
}
