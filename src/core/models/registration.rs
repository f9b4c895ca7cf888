//! Event registrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registration for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: i32,
    pub event_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated registration attempt
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    /// Normalised (trimmed, lower-cased) email
    pub email: String,
    pub phone: Option<String>,
}
