use crate::core::models::GalleryImage;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gallery image database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub club_id: i32,

    pub url: String,

    /// Caption
    pub text: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

/// Gallery image entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::club::Entity",
        from = "Column::ClubId",
        to = "super::club::Column::Id",
        on_delete = "Cascade"
    )]
    Club,
}

impl Related<super::club::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Club.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain gallery image
    pub fn to_domain(&self) -> GalleryImage {
        GalleryImage {
            id: self.id,
            club_id: self.club_id,
            url: self.url.clone(),
            text: self.text.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
        }
    }
}
