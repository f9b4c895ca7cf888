use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GalleryImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GalleryImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GalleryImages::ClubId).integer().not_null())
                    .col(ColumnDef::new(GalleryImages::Url).string().not_null())
                    .col(ColumnDef::new(GalleryImages::Text).string().null())
                    .col(
                        ColumnDef::new(GalleryImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_images_club_id")
                            .from(GalleryImages::Table, GalleryImages::ClubId)
                            .to(Clubs::Table, Clubs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_gallery_images_club_id")
                    .table(GalleryImages::Table)
                    .col(GalleryImages::ClubId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GalleryImages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GalleryImages {
    Table,
    Id,
    ClubId,
    Url,
    Text,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Clubs {
    Table,
    Id,
}
