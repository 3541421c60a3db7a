use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Series {
    Table,
    Id,
    Team1Name,
    Team2Name,
    Format,
    FearlessDraft,
    ScrimBlock,
    Status,
    Winner,
    Team1AuthToken,
    Team2AuthToken,
    IsBlocked,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    SeriesId,
    GameNumber,
    BlueSide,
    RedSide,
    Status,
    Winner,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DraftActions {
    Table,
    Id,
    GameId,
    ActionType,
    Phase,
    Team,
    Champion,
    Position,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // series
        manager
            .create_table(
                Table::create()
                    .table(Series::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Series::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Series::Team1Name).string().not_null())
                    .col(ColumnDef::new(Series::Team2Name).string().not_null())
                    .col(ColumnDef::new(Series::Format).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Series::FearlessDraft)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Series::ScrimBlock)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Series::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Series::Winner).string_len(8).null())
                    .col(ColumnDef::new(Series::Team1AuthToken).string().not_null())
                    .col(ColumnDef::new(Series::Team2AuthToken).string().not_null())
                    .col(
                        ColumnDef::new(Series::IsBlocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Series::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Series::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Games::SeriesId).string().not_null())
                    .col(ColumnDef::new(Games::GameNumber).integer().not_null())
                    .col(ColumnDef::new(Games::BlueSide).string().not_null())
                    .col(ColumnDef::new(Games::RedSide).string().not_null())
                    .col(ColumnDef::new(Games::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Games::Winner).string_len(8).null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_series_id")
                            .from(Games::Table, Games::SeriesId)
                            .to(Series::Table, Series::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_series_number_unique")
                    .table(Games::Table)
                    .col(Games::SeriesId)
                    .col(Games::GameNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // draft_actions
        manager
            .create_table(
                Table::create()
                    .table(DraftActions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DraftActions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DraftActions::GameId).string().not_null())
                    .col(
                        ColumnDef::new(DraftActions::ActionType)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DraftActions::Phase).small_integer().not_null())
                    .col(ColumnDef::new(DraftActions::Team).string_len(8).not_null())
                    .col(ColumnDef::new(DraftActions::Champion).string().not_null())
                    .col(
                        ColumnDef::new(DraftActions::Position)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DraftActions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draft_actions_game_id")
                            .from(DraftActions::Table, DraftActions::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One action per turn, one use per champion, per game
        manager
            .create_index(
                Index::create()
                    .name("idx_draft_actions_game_position_unique")
                    .table(DraftActions::Table)
                    .col(DraftActions::GameId)
                    .col(DraftActions::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_draft_actions_game_champion_unique")
                    .table(DraftActions::Table)
                    .col(DraftActions::GameId)
                    .col(DraftActions::Champion)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DraftActions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Series::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
