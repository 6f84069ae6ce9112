use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Name).string().not_null())
                    // JSON array of designer names
                    .col(ColumnDef::new(Games::Designers).text().not_null())
                    // Opaque cover payload, usually base64 image data
                    .col(ColumnDef::new(Games::Cover).text().not_null())
                    .col(ColumnDef::new(Games::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Games::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Games {
    Table,
    Id,
    Name,
    Designers,
    Cover,
    CreatedAt,
    UpdatedAt,
}
