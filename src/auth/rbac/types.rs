//! RBAC types

use crate::core::models::Role;
use crate::utils::error::{ClubError, Result};

const OFFICERS: &[Role] = &[
    Role::President,
    Role::VicePresident,
    Role::Handler,
    Role::SuperAdmin,
];

const GALLERY_EDITORS: &[Role] = &[Role::President, Role::Handler, Role::SuperAdmin];

const SUPER_ADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

/// Guarded operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateClub,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    ViewRegistrations,
    AddGalleryImage,
    DeleteGalleryImage,
    CreateMember,
    UpdateMember,
    DeleteMember,
}

/// Whether a policy is bound to the caller's own club
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Any resource, role check only
    Global,
    /// Resource must belong to the caller's club unless the caller is super-administrator
    OwnClub,
}

/// Roles allowed to perform an action and its ownership scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub allowed: &'static [Role],
    pub scope: Scope,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::CreateClub,
        Action::CreateEvent,
        Action::UpdateEvent,
        Action::DeleteEvent,
        Action::ViewRegistrations,
        Action::AddGalleryImage,
        Action::DeleteGalleryImage,
        Action::CreateMember,
        Action::UpdateMember,
        Action::DeleteMember,
    ];

    /// Policy table
    pub const fn policy(self) -> Policy {
        match self {
            Action::CreateClub => Policy {
                allowed: SUPER_ADMIN_ONLY,
                scope: Scope::Global,
            },
            Action::CreateEvent
            | Action::UpdateEvent
            | Action::DeleteEvent
            | Action::ViewRegistrations
            | Action::CreateMember
            | Action::UpdateMember
            | Action::DeleteMember => Policy {
                allowed: OFFICERS,
                scope: Scope::OwnClub,
            },
            Action::AddGalleryImage | Action::DeleteGalleryImage => Policy {
                allowed: GALLERY_EDITORS,
                scope: Scope::OwnClub,
            },
        }
    }
}

impl Policy {
    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No valid access token
    Unauthenticated,
    /// Role missing from the policy's allow-list
    RoleNotPermitted,
    /// Resource belongs to another club
    ClubMismatch,
}

impl From<DenyReason> for ClubError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::Unauthenticated => ClubError::unauthenticated("Authentication required"),
            DenyReason::RoleNotPermitted => {
                ClubError::forbidden("Your role is not permitted to perform this action")
            }
            DenyReason::ClubMismatch => {
                ClubError::forbidden("This resource belongs to another club")
            }
        }
    }
}

/// Authorization outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert a denial into the matching client error
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason.into()),
        }
    }
}
