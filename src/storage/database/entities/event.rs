use crate::core::models::Event;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub club_id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub venue: String,

    pub start_time: DateTimeWithTimeZone,

    pub end_time: DateTimeWithTimeZone,

    /// Point of contact
    pub poc: Option<String>,

    pub thumbnail_url: Option<String>,

    /// Maximum number of registrations, unlimited when `None`
    pub capacity: Option<i32>,

    pub restrict_email_domain: bool,

    pub allowed_email_domain: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

/// Event entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::club::Entity",
        from = "Column::ClubId",
        to = "super::club::Column::Id",
        on_delete = "Cascade"
    )]
    Club,

    #[sea_orm(has_many = "super::registration::Entity")]
    Registrations,
}

impl Related<super::club::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Club.def()
    }
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain event
    pub fn to_domain(&self) -> Event {
        Event {
            id: self.id,
            club_id: self.club_id,
            name: self.name.clone(),
            description: self.description.clone(),
            venue: self.venue.clone(),
            start_time: self.start_time.naive_utc().and_utc(),
            end_time: self.end_time.naive_utc().and_utc(),
            poc: self.poc.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            capacity: self.capacity,
            restrict_email_domain: self.restrict_email_domain,
            allowed_email_domain: self.allowed_email_domain.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }
}
