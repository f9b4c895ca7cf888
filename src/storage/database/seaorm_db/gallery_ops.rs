use crate::core::models::{ClubSummary, GalleryEntry, GalleryImage};
use crate::utils::error::{ClubError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, gallery_image};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// List gallery images, newest first, optionally for a single club
    pub async fn list_gallery(&self, club_id: Option<i32>) -> Result<Vec<GalleryEntry>> {
        let mut query = entities::GalleryImage::find();
        if let Some(club_id) = club_id {
            query = query.filter(gallery_image::Column::ClubId.eq(club_id));
        }

        let rows = query
            .find_also_related(entities::Club)
            .order_by_desc(gallery_image::Column::CreatedAt)
            .order_by_desc(gallery_image::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(rows
            .into_iter()
            .map(|(image, club)| GalleryEntry {
                image: image.to_domain(),
                club: club.map(|c| ClubSummary::from(&c.to_domain())),
            })
            .collect())
    }

    /// Find gallery image by ID
    pub async fn find_gallery_image(&self, image_id: i32) -> Result<Option<GalleryImage>> {
        let model = entities::GalleryImage::find_by_id(image_id)
            .one(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Add an image to a club's gallery
    pub async fn add_gallery_image(
        &self,
        club_id: i32,
        url: String,
        text: Option<String>,
    ) -> Result<GalleryImage> {
        debug!("Adding gallery image for club {}", club_id);

        let model = gallery_image::ActiveModel {
            club_id: Set(club_id),
            url: Set(url),
            text: Set(text),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ClubError::Database)?;

        Ok(model.to_domain())
    }

    /// Delete a gallery image; returns whether a row was removed
    pub async fn delete_gallery_image(&self, image_id: i32) -> Result<bool> {
        debug!("Deleting gallery image: {}", image_id);

        let result = entities::GalleryImage::delete_by_id(image_id)
            .exec(&self.db)
            .await
            .map_err(ClubError::Database)?;

        Ok(result.rows_affected > 0)
    }
}
