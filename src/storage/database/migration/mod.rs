use sea_orm_migration::prelude::*;

mod m20250101_000001_create_clubs_table;
mod m20250101_000002_create_users_table;
mod m20250101_000003_create_events_table;
mod m20250101_000004_create_registrations_table;
mod m20250101_000005_create_gallery_images_table;
mod m20250101_000006_create_refresh_tokens_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_clubs_table::Migration),
            Box::new(m20250101_000002_create_users_table::Migration),
            Box::new(m20250101_000003_create_events_table::Migration),
            Box::new(m20250101_000004_create_registrations_table::Migration),
            Box::new(m20250101_000005_create_gallery_images_table::Migration),
            Box::new(m20250101_000006_create_refresh_tokens_table::Migration),
        ]
    }
}
