//! Authenticated caller extractor

use crate::auth::jwt::Claims;
use crate::auth::rbac::{Action, DenyReason, authorize};
use crate::server::middleware::helpers::bearer_token;
use crate::server::state::AppState;
use crate::utils::error::{ClubError, Result};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::{Ready, ready};
use tracing::debug;

/// The caller of a request, resolved from its bearer token
///
/// Requests without an `Authorization` header yield an anonymous caller;
/// a present but invalid token rejects the request with 401.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Claims>);

impl Caller {
    /// Verified claims, if the caller is authenticated
    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }

    /// Evaluate `action` against the caller
    ///
    /// Pass `None` for `resource_club_id` to run only the role gate.
    pub fn authorize(&self, action: Action, resource_club_id: Option<i32>) -> Result<&Claims> {
        authorize(self.claims(), &action.policy(), resource_club_id).into_result()?;
        self.claims()
            .ok_or_else(|| DenyReason::Unauthenticated.into())
    }

    fn from_request_sync(req: &HttpRequest) -> Result<Self> {
        let Some(token) = bearer_token(req.headers())? else {
            return Ok(Self(None));
        };

        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| ClubError::internal("Application state is not configured"))?;

        let claims = state.auth.verify_access_token(token)?;
        debug!("Authenticated user {} as {}", claims.sub, claims.role);
        Ok(Self(Some(claims)))
    }
}

impl FromRequest for Caller {
    type Error = ClubError;
    type Future = Ready<Result<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_sync(req))
    }
}
