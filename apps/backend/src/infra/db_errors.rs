//! SeaORM -> DomainError translation.
//!
//! Adapters return raw `sea_orm::DbErr`; repos and services lift it into
//! `DomainError` through here, and handlers then map to `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a unique-violation message to a conflict kind.
///
/// SQLite reports `UNIQUE constraint failed: table.col, table.col`;
/// Postgres reports the index name. Both are checked.
fn classify_unique_violation(msg: &str) -> Option<(ConflictKind, &'static str)> {
    let sqlite_cols = msg
        .find("UNIQUE constraint failed: ")
        .map(|pos| &msg[pos + "UNIQUE constraint failed: ".len()..])
        .unwrap_or_default();

    let hit = |index: &str, sqlite: &str| {
        msg.contains(index) || (!sqlite_cols.is_empty() && sqlite_cols.starts_with(sqlite))
    };

    if hit("ux_answers_round_player", "answers.round_id, answers.player_id") {
        return Some((ConflictKind::AlreadyAnswered, "Answer already submitted"));
    }
    if hit("ux_answers_one_correct_per_round", "answers.round_id") {
        return Some((
            ConflictKind::Other("CorrectAnswerExists".into()),
            "Correct answer already seeded",
        ));
    }
    if hit("ux_votes_round_voter", "votes.round_id, votes.voter_id") {
        return Some((ConflictKind::AlreadyVoted, "Vote already submitted"));
    }
    if hit("ux_rounds_game_round_number", "rounds.game_id, rounds.round_number") {
        return Some((ConflictKind::RoundAlreadyExists, "Round already exists"));
    }
    if hit(
        "ux_players_game_display_name",
        "players.game_id, players.display_name",
    ) {
        return Some((ConflictKind::DisplayNameTaken, "Display name already taken"));
    }
    if hit("ux_games_join_code", "games.join_code") {
        return Some((ConflictKind::JoinCodeConflict, "Join code already exists"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other(what.clone()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        if let Some((kind, detail)) = classify_unique_violation(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
