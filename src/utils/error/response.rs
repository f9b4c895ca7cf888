//! HTTP response handling for errors

use super::types::ClubError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

impl ClubError {
    /// Status code and client-facing message for this error
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ClubError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ClubError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ClubError::Jwt(_) => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            ClubError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ClubError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ClubError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl ResponseError for ClubError {
    fn status_code(&self) -> StatusCode {
        self.status_and_message().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, message) = self.status_and_message();

        if status_code.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, status = status_code.as_u16(), "Request rejected");
        }

        HttpResponse::build(status_code).json(ErrorResponse { error: message })
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
