use crate::core::models::Club;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Club database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "clubs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub club_name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub logo_image: String,

    pub poster_image: Option<String>,

    /// Category tag
    #[sea_orm(column_name = "type")]
    pub club_type: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

/// Club entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    Users,

    #[sea_orm(has_many = "super::event::Entity")]
    Events,

    #[sea_orm(has_many = "super::gallery_image::Entity")]
    GalleryImages,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::gallery_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryImages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain club
    pub fn to_domain(&self) -> Club {
        Club {
            id: self.id,
            club_name: self.club_name.clone(),
            description: self.description.clone(),
            logo_image: self.logo_image.clone(),
            poster_image: self.poster_image.clone(),
            club_type: self.club_type.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }
}
