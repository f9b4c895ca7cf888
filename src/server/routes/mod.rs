//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by resource.

pub mod auth;
pub mod clubs;
pub mod events;
mod fields;
pub mod gallery;
pub mod members;

use crate::auth::jwt::Claims;
use crate::auth::rbac::DenyReason;
use crate::server::state::AppState;
use crate::utils::error::{ClubError, Result};
use actix_web::web;

/// Configure all resource routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth::configure_routes)
        .configure(clubs::configure_routes)
        .configure(events::configure_routes)
        .configure(gallery::configure_routes)
        .configure(members::configure_routes);
}

/// Club that a newly created resource belongs to
///
/// Super-administrators must name the club; everyone else writes into their
/// own club and may only repeat its id.
pub(crate) fn resolve_club_id(claims: &Claims, requested: Option<i32>) -> Result<i32> {
    if claims.role.is_super_admin() {
        return requested.ok_or_else(|| ClubError::validation("club_id is required"));
    }

    let own = claims
        .club_id
        .ok_or_else(|| ClubError::validation("Your account is not assigned to a club"))?;

    match requested {
        Some(club_id) if club_id != own => Err(DenyReason::ClubMismatch.into()),
        _ => Ok(own),
    }
}

/// Fail with 404 unless the club exists
pub(crate) async fn ensure_club_exists(state: &AppState, club_id: i32) -> Result<()> {
    state
        .db()
        .find_club_by_id(club_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ClubError::not_found("Club not found"))
}
