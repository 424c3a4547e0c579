//! Round repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::domain::{PhaseTimer, RoundStatus};
use crate::entities::rounds;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Round domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub id: i64,
    pub game_id: i64,
    pub round_number: i16,
    pub question_id: i64,
    pub status: RoundStatus,
    /// Quorum captured at creation; never rewritten.
    pub required_players: i16,
    #[serde(with = "time::serde::rfc3339")]
    pub timer_starts_at: OffsetDateTime,
    pub timer_duration_secs: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl Round {
    pub fn timer(&self) -> PhaseTimer {
        PhaseTimer::new(self.timer_starts_at, self.timer_duration_secs)
    }

    fn to_model(&self) -> rounds::Model {
        rounds::Model {
            id: self.id,
            game_id: self.game_id,
            round_number: self.round_number,
            question_id: self.question_id,
            status: self.status.into(),
            required_players: self.required_players,
            timer_starts_at: self.timer_starts_at,
            timer_duration_secs: self.timer_duration_secs,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Fields for a new round.
#[derive(Debug, Clone)]
pub struct NewRound {
    pub game_id: i64,
    pub round_number: i16,
    pub question_id: i64,
    pub status: RoundStatus,
    pub required_players: i16,
    pub timer_starts_at: OffsetDateTime,
    pub timer_duration_secs: i32,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    Ok(rounds_adapter::find_by_id(conn, round_id)
        .await?
        .map(Round::from))
}

pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    find_by_id(conn, round_id)
        .await?
        .ok_or_else(|| round_not_found(round_id))
}

/// Load and row-lock the round (row lock applies on Postgres only).
pub async fn lock_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    rounds_adapter::find_by_id_for_update(conn, round_id)
        .await?
        .map(Round::from)
        .ok_or_else(|| round_not_found(round_id))
}

pub async fn find_by_game_and_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    round_number: i16,
) -> Result<Option<Round>, DomainError> {
    Ok(
        rounds_adapter::find_by_game_and_number(conn, game_id, round_number)
            .await?
            .map(Round::from),
    )
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let rows = rounds_adapter::list_by_game(conn, game_id).await?;
    Ok(rows.into_iter().map(Round::from).collect())
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_round: NewRound,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        game_id: new_round.game_id,
        round_number: new_round.round_number,
        question_id: new_round.question_id,
        status: new_round.status.into(),
        required_players: new_round.required_players,
        timer_starts_at: new_round.timer_starts_at,
        timer_duration_secs: new_round.timer_duration_secs,
    };
    Ok(Round::from(
        rounds_adapter::create_round(conn, dto, now).await?,
    ))
}

/// Advance to `next` with a fresh timer. Only forward, single-step moves are accepted.
pub async fn advance_phase<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &Round,
    next: RoundStatus,
    timer_starts_at: OffsetDateTime,
    timer_duration_secs: i32,
) -> Result<Round, DomainError> {
    ensure_forward(round, next)?;
    let model = rounds_adapter::set_phase(
        conn,
        round.to_model(),
        next.into(),
        timer_starts_at,
        timer_duration_secs,
    )
    .await?;
    Ok(Round::from(model))
}

pub async fn complete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &Round,
    now: OffsetDateTime,
) -> Result<Round, DomainError> {
    ensure_forward(round, RoundStatus::Completed)?;
    let model = rounds_adapter::complete_round(conn, round.to_model(), now).await?;
    Ok(Round::from(model))
}

fn ensure_forward(round: &Round, next: RoundStatus) -> Result<(), DomainError> {
    if round.status.can_become(next) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!(
                "Round {} cannot move from {:?} to {next:?}",
                round.id, round.status
            ),
        ))
    }
}

fn round_not_found(round_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
}

// Conversions between SeaORM models and domain models

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            round_number: model.round_number,
            question_id: model.question_id,
            status: model.status.into(),
            required_players: model.required_players,
            timer_starts_at: model.timer_starts_at,
            timer_duration_secs: model.timer_duration_secs,
            created_at: model.created_at,
            completed_at: model.completed_at,
        }
    }
}

impl From<rounds::RoundStatus> for RoundStatus {
    fn from(status: rounds::RoundStatus) -> Self {
        match status {
            rounds::RoundStatus::Pending => RoundStatus::Pending,
            rounds::RoundStatus::Answering => RoundStatus::Answering,
            rounds::RoundStatus::Voting => RoundStatus::Voting,
            rounds::RoundStatus::Completed => RoundStatus::Completed,
        }
    }
}

impl From<RoundStatus> for rounds::RoundStatus {
    fn from(status: RoundStatus) -> Self {
        match status {
            RoundStatus::Pending => rounds::RoundStatus::Pending,
            RoundStatus::Answering => rounds::RoundStatus::Answering,
            RoundStatus::Voting => rounds::RoundStatus::Voting,
            RoundStatus::Completed => rounds::RoundStatus::Completed,
        }
    }
}
