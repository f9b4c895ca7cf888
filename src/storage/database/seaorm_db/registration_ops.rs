use crate::core::models::{NewRegistration, Registration};
use crate::core::registration::{RegistrationError, check_admission};
use crate::utils::error::{ClubError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::{debug, info};

use super::super::entities::{self, event, registration};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Admit and store a registration
    ///
    /// The first statement of the transaction is a no-op write on the event
    /// row. It takes the row lock on PostgreSQL and the database write lock on
    /// SQLite before anything is read, so concurrent attempts queue behind the
    /// busy timeout instead of failing on a read-to-write lock upgrade. The
    /// capacity count then always sees every committed registration.
    pub async fn register_for_event(
        &self,
        event_id: i32,
        attempt: &NewRegistration,
    ) -> Result<Registration> {
        debug!("Registering {} for event {}", attempt.email, event_id);

        let txn = self.db.begin().await.map_err(ClubError::Database)?;

        let locked = entities::Event::update_many()
            .col_expr(event::Column::Capacity, Expr::col(event::Column::Capacity).into())
            .filter(event::Column::Id.eq(event_id))
            .exec(&txn)
            .await
            .map_err(ClubError::Database)?;
        if locked.rows_affected == 0 {
            return Err(RegistrationError::EventNotFound.into());
        }

        let event = entities::Event::find_by_id(event_id)
            .one(&txn)
            .await
            .map_err(ClubError::Database)?
            .ok_or(RegistrationError::EventNotFound)?
            .to_domain();

        let existing = entities::Registration::find()
            .filter(registration::Column::EventId.eq(event_id))
            .count(&txn)
            .await
            .map_err(ClubError::Database)?;

        check_admission(&event, existing, &attempt.email)?;

        let model = registration::ActiveModel {
            event_id: Set(event_id),
            name: Set(attempt.name.clone()),
            email: Set(attempt.email.clone()),
            phone: Set(attempt.phone.clone()),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ClubError::from(RegistrationError::DuplicateRegistration)
            }
            _ => ClubError::Database(e),
        })?;

        txn.commit().await.map_err(ClubError::Database)?;

        info!("Registration {} stored for event {}", model.id, event_id);
        Ok(model.to_domain())
    }

    /// Registrations for an event, newest first
    pub async fn list_registrations(&self, event_id: i32) -> Result<Vec<Registration>> {
        let models = entities::Registration::find()
            .filter(registration::Column::EventId.eq(event_id))
            .order_by_desc(registration::Column::CreatedAt)
            .order_by_desc(registration::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(models.iter().map(|m| m.to_domain()).collect())
    }
}
