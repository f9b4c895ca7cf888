//! Authorization decision function

use super::types::{Decision, DenyReason, Policy, Scope};
use crate::auth::jwt::Claims;

/// Decide whether `claims` may act under `policy`
///
/// `resource_club_id` is the owning club of the targeted resource, when the
/// resource is already known. Without it only the role gate is evaluated.
pub fn authorize(
    claims: Option<&Claims>,
    policy: &Policy,
    resource_club_id: Option<i32>,
) -> Decision {
    let Some(claims) = claims else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    if !policy.permits(claims.role) {
        return Decision::Deny(DenyReason::RoleNotPermitted);
    }

    if policy.scope == Scope::OwnClub && !claims.role.is_super_admin() {
        if let Some(resource_club) = resource_club_id {
            if claims.club_id != Some(resource_club) {
                return Decision::Deny(DenyReason::ClubMismatch);
            }
        }
    }

    Decision::Allow
}
