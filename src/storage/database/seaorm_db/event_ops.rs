use crate::core::models::{Event, EventDetail, NewEvent};
use crate::utils::error::{ClubError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, event, registration};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// List all events, soonest first
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let models = entities::Event::find()
            .order_by_asc(event::Column::StartTime)
            .order_by_asc(event::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(models.iter().map(|m| m.to_domain()).collect())
    }

    /// Find event by ID
    pub async fn find_event_by_id(&self, event_id: i32) -> Result<Option<Event>> {
        let model = entities::Event::find_by_id(event_id)
            .one(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Event with attendee count and seats left
    pub async fn get_event_detail(&self, event_id: i32) -> Result<Option<EventDetail>> {
        let Some(event) = self.find_event_by_id(event_id).await? else {
            return Ok(None);
        };

        let attendees = self.count_registrations(event_id).await?;
        Ok(Some(EventDetail::new(event, attendees)))
    }

    /// Number of registrations stored for an event
    pub async fn count_registrations(&self, event_id: i32) -> Result<u64> {
        entities::Registration::find()
            .filter(registration::Column::EventId.eq(event_id))
            .count(&self.db)
            .await
            .map_err(ClubError::Database)
    }

    /// Create a new event
    pub async fn create_event(&self, new_event: NewEvent) -> Result<Event> {
        debug!("Creating event {} for club {}", new_event.name, new_event.club_id);

        let now = chrono::Utc::now();
        let model = event::ActiveModel {
            club_id: Set(new_event.club_id),
            name: Set(new_event.name),
            description: Set(new_event.description),
            venue: Set(new_event.venue),
            start_time: Set(new_event.start_time.into()),
            end_time: Set(new_event.end_time.into()),
            poc: Set(new_event.poc),
            thumbnail_url: Set(new_event.thumbnail_url),
            capacity: Set(new_event.capacity),
            restrict_email_domain: Set(new_event.restrict_email_domain),
            allowed_email_domain: Set(new_event.allowed_email_domain),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ClubError::Database)?;

        Ok(model.to_domain())
    }

    /// Persist every mutable field of `event`
    pub async fn update_event(&self, event: &Event) -> Result<Event> {
        debug!("Updating event: {}", event.id);

        let model = event::ActiveModel {
            id: Unchanged(event.id),
            club_id: Set(event.club_id),
            name: Set(event.name.clone()),
            description: Set(event.description.clone()),
            venue: Set(event.venue.clone()),
            start_time: Set(event.start_time.into()),
            end_time: Set(event.end_time.into()),
            poc: Set(event.poc.clone()),
            thumbnail_url: Set(event.thumbnail_url.clone()),
            capacity: Set(event.capacity),
            restrict_email_domain: Set(event.restrict_email_domain),
            allowed_email_domain: Set(event.allowed_email_domain.clone()),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => ClubError::not_found("Event not found"),
            other => ClubError::Database(other),
        })?;

        Ok(model.to_domain())
    }

    /// Delete an event and its registrations in one transaction
    pub async fn delete_event(&self, event_id: i32) -> Result<bool> {
        debug!("Deleting event: {}", event_id);

        let txn = self.db.begin().await.map_err(ClubError::Database)?;

        entities::Registration::delete_many()
            .filter(registration::Column::EventId.eq(event_id))
            .exec(&txn)
            .await
            .map_err(ClubError::Database)?;

        let result = entities::Event::delete_by_id(event_id)
            .exec(&txn)
            .await
            .map_err(ClubError::Database)?;

        txn.commit().await.map_err(ClubError::Database)?;
        Ok(result.rows_affected > 0)
    }
}
