//! Gallery images

use super::ClubSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image in a club's gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i32,
    pub club_id: i32,
    pub url: String,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Gallery image with its owning club embedded
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    #[serde(flatten)]
    pub image: GalleryImage,
    pub club: Option<ClubSummary>,
}
