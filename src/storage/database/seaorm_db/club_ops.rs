use crate::core::models::{Club, ClubDetail, ClubWithCount, NewClub};
use crate::utils::error::{ClubError, Result};
use sea_orm::*;
use std::collections::HashMap;
use tracing::debug;

use super::super::entities::{self, club, event, user};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find club by ID
    pub async fn find_club_by_id(&self, club_id: i32) -> Result<Option<Club>> {
        let model = entities::Club::find_by_id(club_id)
            .one(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Number of members per club, computed with one grouped query
    async fn member_counts(&self) -> Result<HashMap<i32, u64>> {
        let rows: Vec<(Option<i32>, i64)> = entities::User::find()
            .select_only()
            .column(user::Column::ClubId)
            .column_as(user::Column::Id.count(), "members")
            .filter(user::Column::ClubId.is_not_null())
            .group_by(user::Column::ClubId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(rows
            .into_iter()
            .filter_map(|(club_id, count)| club_id.map(|id| (id, count.max(0) as u64)))
            .collect())
    }

    /// List all clubs with their live member counts
    pub async fn list_clubs(&self) -> Result<Vec<ClubWithCount>> {
        debug!("Listing clubs");

        let clubs = entities::Club::find()
            .order_by_asc(club::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubError::Database)?;
        let counts = self.member_counts().await?;

        Ok(clubs
            .iter()
            .map(|model| ClubWithCount {
                members_count: counts.get(&model.id).copied().unwrap_or(0),
                club: model.to_domain(),
            })
            .collect())
    }

    /// Club with its members and event count
    pub async fn get_club_detail(&self, club_id: i32) -> Result<Option<ClubDetail>> {
        debug!("Loading club detail: {}", club_id);

        let Some(club) = self.find_club_by_id(club_id).await? else {
            return Ok(None);
        };

        let members = self.list_club_members(club_id).await?;
        let event_count = entities::Event::find()
            .filter(event::Column::ClubId.eq(club_id))
            .count(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(Some(ClubDetail {
            club,
            members_count: members.len() as u64,
            members,
            event_count,
        }))
    }

    /// Create a new club
    pub async fn create_club(&self, new_club: NewClub) -> Result<Club> {
        debug!("Creating club: {}", new_club.club_name);

        let now = chrono::Utc::now();
        let model = club::ActiveModel {
            club_name: Set(new_club.club_name),
            description: Set(new_club.description),
            logo_image: Set(new_club.logo_image),
            poster_image: Set(new_club.poster_image),
            club_type: Set(new_club.club_type),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ClubError::Database)?;

        Ok(model.to_domain())
    }
}
