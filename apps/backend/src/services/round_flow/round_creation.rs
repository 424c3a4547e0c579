use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::exit_actions::round_status_event;
use super::RoundFlowService;
use crate::domain::phase::MIN_QUORUM;
use crate::domain::{GameStatus, RoundStatus};
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};
use crate::events::GameEvent;
use crate::repos::rounds::{self, NewRound, Round};
use crate::repos::{games, players, questions};

impl RoundFlowService {
    /// Open the game's current round with a frozen quorum.
    ///
    /// Only the leader may do this, only while playing, and only once per
    /// round number. `required_players` is the connected count right now.
    pub async fn create_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        requested_by: i64,
        question_id: i64,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<Round, DomainError> {
        let game = games::lock_game(conn, game_id).await?;

        if game.leader_player_id != Some(requested_by) {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotLeader,
                format!("Player {requested_by} is not the leader of game {game_id}"),
            ));
        }
        if game.status != GameStatus::Playing {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Game {game_id} is {:?}, rounds need a game in play", game.status),
            ));
        }
        if rounds::find_by_game_and_number(conn, game_id, game.current_round)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                ConflictKind::RoundAlreadyExists,
                format!("Round {} of game {game_id} already exists", game.current_round),
            ));
        }

        let question = questions::require_question(conn, question_id).await?;

        let connected = players::count_connected(conn, game_id).await?;
        let required_players = i16::try_from(connected).unwrap_or(i16::MAX);
        if required_players < MIN_QUORUM {
            warn!(game_id, connected, "round creation refused: insufficient quorum");
            return Err(DomainError::validation(
                ValidationKind::InsufficientQuorum,
                format!("At least {MIN_QUORUM} connected players are required, found {connected}"),
            ));
        }

        let round = rounds::create_round(
            conn,
            NewRound {
                game_id,
                round_number: game.current_round,
                question_id: question.id,
                status: RoundStatus::Answering,
                required_players,
                timer_starts_at: now,
                timer_duration_secs: self.engine.answer_seconds,
            },
            now,
        )
        .await?;

        info!(
            game_id,
            round_id = round.id,
            round_number = round.round_number,
            required_players,
            "Round created, answering open"
        );
        events.push(round_status_event(&round));
        Ok(round)
    }
}
