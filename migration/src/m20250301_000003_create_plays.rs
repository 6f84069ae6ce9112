use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000002_create_games::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plays::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plays::UserId).integer().not_null())
                    .col(ColumnDef::new(Plays::GameId).integer().not_null())
                    .col(ColumnDef::new(Plays::Name).string().not_null())
                    .col(ColumnDef::new(Plays::AdditionalData).text().not_null())
                    .col(ColumnDef::new(Plays::PlayedAt).big_integer().not_null())
                    .col(ColumnDef::new(Plays::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Plays::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plays_user_id")
                            .from(Plays::Table, Plays::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plays_game_id")
                            .from(Plays::Table, Plays::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plays_user_id")
                    .table(Plays::Table)
                    .col(Plays::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plays_game_id")
                    .table(Plays::Table)
                    .col(Plays::GameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plays::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Plays {
    Table,
    Id,
    UserId,
    GameId,
    Name,
    AdditionalData,
    PlayedAt,
    CreatedAt,
    UpdatedAt,
}
