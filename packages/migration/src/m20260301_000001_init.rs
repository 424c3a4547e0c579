use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    JoinCode,
    Status,
    RoundCount,
    CurrentRound,
    MaxPlayers,
    HostPlayerId,
    LeaderPlayerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    GameId,
    DisplayName,
    Score,
    IsConnected,
    ConnectedSince,
    JoinedAt,
}

#[derive(Iden)]
enum Questions {
    Table,
    Id,
    Prompt,
    CorrectAnswer,
    CreatedAt,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    GameId,
    RoundNumber,
    QuestionId,
    Status,
    RequiredPlayers,
    TimerStartsAt,
    TimerDurationSecs,
    CreatedAt,
    CompletedAt,
}

#[derive(Iden)]
enum Answers {
    Table,
    Id,
    RoundId,
    PlayerId,
    Text,
    IsCorrect,
    SubmittedAt,
}

#[derive(Iden)]
enum Votes {
    Table,
    Id,
    RoundId,
    VoterId,
    AnswerId,
    PointsEarned,
    CreatedAt,
}

#[derive(Iden)]
enum RoundScores {
    Table,
    Id,
    RoundId,
    PlayerId,
    CorrectGuessPoints,
    FooledPoints,
    PerfectFakePoints,
    WinnerBonus,
    RoundTotal,
    TotalAfter,
    CreatedAt,
}

fn id_col<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn ts_col<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(id_col(Games::Id))
                    .col(ColumnDef::new(Games::JoinCode).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string_len(16)
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(ColumnDef::new(Games::RoundCount).small_integer().not_null())
                    .col(
                        ColumnDef::new(Games::CurrentRound)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::MaxPlayers).small_integer().not_null())
                    .col(ColumnDef::new(Games::HostPlayerId).big_integer().null())
                    .col(ColumnDef::new(Games::LeaderPlayerId).big_integer().null())
                    .col(ts_col(Games::CreatedAt))
                    .col(ts_col(Games::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_games_join_code")
                    .table(Games::Table)
                    .col(Games::JoinCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(id_col(Players::Id))
                    .col(ColumnDef::new(Players::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Players::DisplayName).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Players::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Players::IsConnected)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Players::ConnectedSince)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ts_col(Players::JoinedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_game_id")
                            .from(Players::Table, Players::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_players_game_display_name")
                    .table(Players::Table)
                    .col(Players::GameId)
                    .col(Players::DisplayName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // questions
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(id_col(Questions::Id))
                    .col(ColumnDef::new(Questions::Prompt).text().not_null())
                    .col(ColumnDef::new(Questions::CorrectAnswer).string().not_null())
                    .col(ts_col(Questions::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(id_col(Rounds::Id))
                    .col(ColumnDef::new(Rounds::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Rounds::RoundNumber).small_integer().not_null())
                    .col(ColumnDef::new(Rounds::QuestionId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rounds::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Rounds::RequiredPlayers)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ts_col(Rounds::TimerStartsAt))
                    .col(
                        ColumnDef::new(Rounds::TimerDurationSecs)
                            .integer()
                            .not_null(),
                    )
                    .col(ts_col(Rounds::CreatedAt))
                    .col(
                        ColumnDef::new(Rounds::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_game_id")
                            .from(Rounds::Table, Rounds::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_question_id")
                            .from(Rounds::Table, Rounds::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_rounds_game_round_number")
                    .table(Rounds::Table)
                    .col(Rounds::GameId)
                    .col(Rounds::RoundNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // answers
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(id_col(Answers::Id))
                    .col(ColumnDef::new(Answers::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::PlayerId).big_integer().null())
                    .col(ColumnDef::new(Answers::Text).string().not_null())
                    .col(
                        ColumnDef::new(Answers::IsCorrect)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ts_col(Answers::SubmittedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answers_round_id")
                            .from(Answers::Table, Answers::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answers_player_id")
                            .from(Answers::Table, Answers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL player ids (system-seeded rows) never collide here.
        manager
            .create_index(
                Index::create()
                    .name("ux_answers_round_player")
                    .table(Answers::Table)
                    .col(Answers::RoundId)
                    .col(Answers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Partial unique index: at most one correct answer per round.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_answers_one_correct_per_round \
                 ON answers (round_id) WHERE is_correct",
            )
            .await?;

        // votes
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(id_col(Votes::Id))
                    .col(ColumnDef::new(Votes::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Votes::VoterId).big_integer().not_null())
                    .col(ColumnDef::new(Votes::AnswerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Votes::PointsEarned)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ts_col(Votes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_round_id")
                            .from(Votes::Table, Votes::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_voter_id")
                            .from(Votes::Table, Votes::VoterId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_answer_id")
                            .from(Votes::Table, Votes::AnswerId)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_votes_round_voter")
                    .table(Votes::Table)
                    .col(Votes::RoundId)
                    .col(Votes::VoterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_scores
        manager
            .create_table(
                Table::create()
                    .table(RoundScores::Table)
                    .if_not_exists()
                    .col(id_col(RoundScores::Id))
                    .col(ColumnDef::new(RoundScores::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(RoundScores::PlayerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoundScores::CorrectGuessPoints)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoundScores::FooledPoints).integer().not_null())
                    .col(
                        ColumnDef::new(RoundScores::PerfectFakePoints)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoundScores::WinnerBonus).integer().not_null())
                    .col(ColumnDef::new(RoundScores::RoundTotal).integer().not_null())
                    .col(ColumnDef::new(RoundScores::TotalAfter).integer().not_null())
                    .col(ts_col(RoundScores::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_scores_round_id")
                            .from(RoundScores::Table, RoundScores::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_scores_player_id")
                            .from(RoundScores::Table, RoundScores::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_scores_round_player")
                    .table(RoundScores::Table)
                    .col(RoundScores::RoundId)
                    .col(RoundScores::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoundScores::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Votes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Answers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rounds::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
