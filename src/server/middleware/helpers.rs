//! Helper functions for request authentication

use crate::utils::error::{ClubError, Result};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Extract the bearer token from the `Authorization` header
///
/// Returns `Ok(None)` when the header is absent and an error when it is
/// present but not a well-formed bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| ClubError::unauthenticated("Malformed Authorization header"))?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| ClubError::unauthenticated("Malformed Authorization header"))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ClubError::unauthenticated(
            "Authorization header must use the Bearer scheme",
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ClubError::unauthenticated("Malformed Authorization header"));
    }

    Ok(Some(token))
}
