//! Clubs

use super::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: i32,
    pub club_name: String,
    pub description: String,
    pub logo_image: String,
    pub poster_image: Option<String>,
    #[serde(rename = "type")]
    pub club_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a club
#[derive(Debug, Clone)]
pub struct NewClub {
    pub club_name: String,
    pub description: String,
    pub logo_image: String,
    pub poster_image: Option<String>,
    pub club_type: String,
}

/// Club with a member count derived at read time
#[derive(Debug, Clone, Serialize)]
pub struct ClubWithCount {
    #[serde(flatten)]
    pub club: Club,
    #[serde(rename = "membersCount")]
    pub members_count: u64,
}

/// Member entry embedded in a club detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubMember {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
}

/// Club detail: members and counts
#[derive(Debug, Clone, Serialize)]
pub struct ClubDetail {
    #[serde(flatten)]
    pub club: Club,
    pub members: Vec<ClubMember>,
    #[serde(rename = "membersCount")]
    pub members_count: u64,
    #[serde(rename = "eventCount")]
    pub event_count: u64,
}

/// Minimal club reference embedded in other resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubSummary {
    pub id: i32,
    pub club_name: String,
    pub logo_image: String,
}

impl From<&Club> for ClubSummary {
    fn from(club: &Club) -> Self {
        Self {
            id: club.id,
            club_name: club.club_name.clone(),
            logo_image: club.logo_image.clone(),
        }
    }
}
