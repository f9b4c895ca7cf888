//! Member roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role held by a club member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Ordinary member
    #[default]
    Member,
    /// Club president
    President,
    /// Club vice-president
    VicePresident,
    /// Content handler
    Handler,
    /// Cross-club super-administrator
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Member,
        Role::President,
        Role::VicePresident,
        Role::Handler,
        Role::SuperAdmin,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "MEMBER",
            Role::President => "PRESIDENT",
            Role::VicePresident => "VICE_PRESIDENT",
            Role::Handler => "HANDLER",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Officers who may manage their own club's content, plus the super-administrator
    pub fn is_privileged(&self) -> bool {
        !matches!(self, Role::Member)
    }

    /// Whether a holder of this role may grant `target` to someone else
    pub fn can_assign(&self, target: Role) -> bool {
        match self {
            Role::SuperAdmin => true,
            Role::Member => false,
            _ => target != Role::SuperAdmin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid role: {}", s))
    }
}
