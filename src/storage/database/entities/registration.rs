use crate::core::models::Registration;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Registration database model
///
/// `(event_id, email)` is unique; see the registrations migration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub event_id: i32,

    pub name: String,

    pub email: String,

    pub phone: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

/// Registration entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain registration
    pub fn to_domain(&self) -> Registration {
        Registration {
            id: self.id,
            event_id: self.event_id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
        }
    }
}
