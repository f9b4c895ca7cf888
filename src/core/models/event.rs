//! Events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event hosted by a club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub club_id: i32,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub poc: Option<String>,
    pub thumbnail_url: Option<String>,
    pub capacity: Option<i32>,
    pub restrict_email_domain: bool,
    pub allowed_email_domain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub club_id: i32,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub poc: Option<String>,
    pub thumbnail_url: Option<String>,
    pub capacity: Option<i32>,
    pub restrict_email_domain: bool,
    pub allowed_email_domain: Option<String>,
}

/// Partial event update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub club_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub poc: Option<Option<String>>,
    pub thumbnail_url: Option<Option<String>>,
    pub capacity: Option<Option<i32>>,
    pub restrict_email_domain: Option<bool>,
    pub allowed_email_domain: Option<Option<String>>,
}

impl EventChanges {
    /// Apply the changes to `event` in place
    ///
    /// The allowed domain is cleared whenever the merged event is unrestricted.
    pub fn apply(self, event: &mut Event) {
        if let Some(club_id) = self.club_id {
            event.club_id = club_id;
        }
        if let Some(name) = self.name {
            event.name = name;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(venue) = self.venue {
            event.venue = venue;
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(poc) = self.poc {
            event.poc = poc;
        }
        if let Some(thumbnail_url) = self.thumbnail_url {
            event.thumbnail_url = thumbnail_url;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(restrict) = self.restrict_email_domain {
            event.restrict_email_domain = restrict;
        }
        if let Some(domain) = self.allowed_email_domain {
            event.allowed_email_domain = domain;
        }
        if !event.restrict_email_domain {
            event.allowed_email_domain = None;
        }
    }
}

/// Event with its registration count and remaining seats
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub attendees: u64,
    #[serde(rename = "seatsLeft")]
    pub seats_left: Option<i64>,
}

impl EventDetail {
    pub fn new(event: Event, attendees: u64) -> Self {
        let seats_left = event
            .capacity
            .map(|capacity| (i64::from(capacity) - attendees as i64).max(0));
        Self {
            event,
            attendees,
            seats_left,
        }
    }
}
