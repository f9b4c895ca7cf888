use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clubs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clubs::ClubName).string().not_null())
                    .col(ColumnDef::new(Clubs::Description).text().not_null())
                    .col(ColumnDef::new(Clubs::LogoImage).string().not_null())
                    .col(ColumnDef::new(Clubs::PosterImage).string().null())
                    .col(ColumnDef::new(Clubs::ClubType).string().not_null())
                    .col(
                        ColumnDef::new(Clubs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Clubs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clubs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clubs {
    Table,
    Id,
    ClubName,
    Description,
    LogoImage,
    PosterImage,
    #[sea_orm(iden = "type")]
    ClubType,
    CreatedAt,
    UpdatedAt,
}
