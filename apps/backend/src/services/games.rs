//! Game sessions: creation, joining, roster connectivity, start and snapshots.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::answer_text::{self, MAX_DISPLAY_NAME_CHARS};
use crate::domain::phase::MIN_QUORUM;
use crate::domain::{GameStatus, RoundStatus};
use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::events::GameEvent;
use crate::repos::answers::{self, Answer};
use crate::repos::games::{self, Game};
use crate::repos::players::{self, Player};
use crate::repos::round_scores::{self, RoundScore};
use crate::repos::rounds::{self, Round};
use crate::repos::{questions, votes};
use crate::services::scope::in_game_scope;
use crate::state::app_state::AppState;
use crate::utils::join_code::{generate_join_code, normalize_join_code};

pub const ROUND_COUNT_RANGE: std::ops::RangeInclusive<i16> = 1..=50;
pub const MAX_PLAYERS_RANGE: std::ops::RangeInclusive<i16> = 2..=16;
const JOIN_CODE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SeatedPlayer {
    pub game: Game,
    pub player: Player,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionChange {
    pub player: Player,
    /// True when the player who just disconnected holds leadership;
    /// clients follow up with a promotion request.
    pub leader_disconnected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerView {
    pub id: i64,
    pub text: String,
    /// Revealed once the round is completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundSnapshot {
    #[serde(flatten)]
    pub round: Round,
    pub prompt: String,
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    pub remaining_ms: i64,
    pub answers_submitted: u64,
    pub votes_cast: u64,
    pub answers: Vec<AnswerView>,
    pub scores: Vec<RoundScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub game: Game,
    pub players: Vec<Player>,
    pub round: Option<RoundSnapshot>,
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Create a game in `waiting` with its host seated, connected and leading.
    #[instrument(skip(self, state, host_name))]
    pub async fn create_game(
        &self,
        state: &AppState,
        host_name: &str,
        round_count: i16,
        max_players: i16,
    ) -> Result<SeatedPlayer, AppError> {
        if !ROUND_COUNT_RANGE.contains(&round_count) || !MAX_PLAYERS_RANGE.contains(&max_players) {
            return Err(DomainError::validation(
                ValidationKind::InvalidGameConfig,
                format!(
                    "round_count must be {}-{} and max_players {}-{}",
                    ROUND_COUNT_RANGE.start(),
                    ROUND_COUNT_RANGE.end(),
                    MAX_PLAYERS_RANGE.start(),
                    MAX_PLAYERS_RANGE.end()
                ),
            )
            .into());
        }
        let host_name = clean_display_name(host_name)?;

        for attempt in 1..=JOIN_CODE_ATTEMPTS {
            let join_code = generate_join_code();
            let name = host_name.clone();
            let result = with_txn(state, move |txn| {
                Box::pin(async move {
                    let now = OffsetDateTime::now_utc();
                    let game =
                        games::create_game(txn, join_code, round_count, max_players, now).await?;
                    let host = players::create_player(txn, game.id, name, now).await?;
                    let game = games::set_host(txn, &game, host.id, now).await?;
                    Ok::<_, AppError>(SeatedPlayer { game, player: host })
                })
            })
            .await;

            match result {
                Err(err) if err.code() == ErrorCode::JoinCodeConflict => {
                    warn!(attempt, "join code collision, retrying");
                }
                Ok(seated) => {
                    info!(
                        game_id = seated.game.id,
                        host_player_id = seated.player.id,
                        round_count,
                        max_players,
                        "game created"
                    );
                    return Ok(seated);
                }
                Err(err) => return Err(err),
            }
        }
        Err(AppError::conflict(
            ErrorCode::JoinCodeConflict,
            "Could not allocate a unique join code",
        ))
    }

    /// Seat a new connected player while the game is still waiting.
    #[instrument(skip(self, state, display_name))]
    pub async fn join_game(
        &self,
        state: &AppState,
        join_code: &str,
        display_name: &str,
    ) -> Result<SeatedPlayer, AppError> {
        let code = normalize_join_code(join_code).ok_or_else(|| {
            AppError::not_found(ErrorCode::GameNotFound, "No game with that join code")
        })?;
        let game = games::find_by_join_code(require_db(state)?, &code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(ErrorCode::GameNotFound, "No game with that join code")
            })?;
        let display_name = clean_display_name(display_name)?;

        in_game_scope(state, game.id, move |txn, now| {
            Box::pin(async move {
                let game = games::lock_game(txn, game.id).await?;
                if game.status != GameStatus::Waiting {
                    return Err(DomainError::validation(
                        ValidationKind::PhaseMismatch,
                        "Game has already started",
                    )
                    .into());
                }

                let roster = players::list_by_game(txn, game.id).await?;
                // Disconnected players keep their seat so they can reconnect.
                if roster.len() >= game.max_players.max(0) as usize {
                    return Err(DomainError::validation(
                        ValidationKind::GameFull,
                        format!("Game is full ({} players)", game.max_players),
                    )
                    .into());
                }
                let wanted = answer_text::normalize(&display_name);
                if roster
                    .iter()
                    .any(|p| answer_text::normalize(&p.display_name) == wanted)
                {
                    return Err(DomainError::conflict(
                        ConflictKind::DisplayNameTaken,
                        format!("'{display_name}' is already taken"),
                    )
                    .into());
                }

                let player = players::create_player(txn, game.id, display_name, now).await?;
                info!(game_id = game.id, player_id = player.id, "player joined");
                let events = vec![GameEvent::PlayerJoined {
                    game_id: game.id,
                    player_id: player.id,
                    display_name: player.display_name.clone(),
                }];
                Ok((SeatedPlayer { game, player }, events))
            })
        })
        .await
    }

    /// Leader moves the game from waiting to playing, round 1.
    #[instrument(skip(self, state))]
    pub async fn start_game(
        &self,
        state: &AppState,
        game_id: i64,
        requested_by: i64,
    ) -> Result<Game, AppError> {
        in_game_scope(state, game_id, move |txn, now| {
            Box::pin(async move {
                let game = games::lock_game(txn, game_id).await?;
                if game.leader_player_id != Some(requested_by) {
                    return Err(DomainError::forbidden(
                        ForbiddenKind::NotLeader,
                        format!("Player {requested_by} is not the leader of game {game_id}"),
                    )
                    .into());
                }
                if game.status != GameStatus::Waiting {
                    return Err(DomainError::validation(
                        ValidationKind::PhaseMismatch,
                        format!("Game {game_id} is {:?}", game.status),
                    )
                    .into());
                }
                let connected = players::count_connected(txn, game_id).await?;
                if connected < MIN_QUORUM as u64 {
                    return Err(DomainError::validation(
                        ValidationKind::InsufficientQuorum,
                        format!(
                            "At least {MIN_QUORUM} connected players are required, found {connected}"
                        ),
                    )
                    .into());
                }

                let game = games::set_progress(txn, &game, GameStatus::Playing, 1, now).await?;
                info!(game_id, connected, "game started");
                let events = vec![GameEvent::GameProgressed {
                    game_id,
                    status: game.status,
                    current_round: game.current_round,
                }];
                Ok((game, events))
            })
        })
        .await
    }

    pub async fn mark_connected(
        &self,
        state: &AppState,
        player_id: i64,
    ) -> Result<ConnectionChange, AppError> {
        self.set_connection(state, player_id, true).await
    }

    pub async fn mark_disconnected(
        &self,
        state: &AppState,
        player_id: i64,
    ) -> Result<ConnectionChange, AppError> {
        self.set_connection(state, player_id, false).await
    }

    /// Roster maintenance. Never touches rounds: a frozen quorum stays frozen.
    #[instrument(skip(self, state))]
    async fn set_connection(
        &self,
        state: &AppState,
        player_id: i64,
        connected: bool,
    ) -> Result<ConnectionChange, AppError> {
        let game_id = players::require_player(require_db(state)?, player_id)
            .await?
            .game_id;

        in_game_scope(state, game_id, move |txn, now| {
            Box::pin(async move {
                let game = games::lock_game(txn, game_id).await?;
                let player = players::require_player(txn, player_id).await?;
                let is_leader = game.leader_player_id == Some(player_id);

                if player.is_connected == connected {
                    return Ok((
                        ConnectionChange {
                            leader_disconnected: !connected && is_leader,
                            player,
                        },
                        Vec::new(),
                    ));
                }

                let player = players::set_connected(txn, &player, connected, now).await?;
                info!(game_id, player_id, connected, is_leader, "connection changed");
                let events = vec![GameEvent::PlayerConnectionChanged {
                    game_id,
                    player_id,
                    is_connected: connected,
                }];
                Ok((
                    ConnectionChange {
                        leader_disconnected: !connected && is_leader,
                        player,
                    },
                    events,
                ))
            })
        })
        .await
    }

    /// Read-only view of a game and its latest round, with server-computed time left.
    pub async fn snapshot(&self, state: &AppState, game_id: i64) -> Result<GameSnapshot, AppError> {
        let db = require_db(state)?;
        let now = OffsetDateTime::now_utc();
        let game = games::require_game(db, game_id).await?;
        let roster = players::list_by_game(db, game_id).await?;

        let round = match rounds::list_by_game(db, game_id).await?.pop() {
            Some(round) => Some(round_snapshot(db, round, now).await?),
            None => None,
        };

        Ok(GameSnapshot {
            game,
            players: roster,
            round,
            server_time: now,
        })
    }

    /// Game id for a player, for handlers that only know the player.
    pub async fn game_of_player(&self, state: &AppState, player_id: i64) -> Result<i64, AppError> {
        Ok(players::require_player(require_db(state)?, player_id)
            .await?
            .game_id)
    }
}

async fn round_snapshot<C: sea_orm::ConnectionTrait + Send + Sync>(
    conn: &C,
    round: Round,
    now: OffsetDateTime,
) -> Result<RoundSnapshot, DomainError> {
    let question = questions::require_question(conn, round.question_id).await?;
    let timer = round.timer();
    let round_answers = answers::list_by_round(conn, round.id).await?;
    let answers_submitted = round_answers.iter().filter(|a| !a.is_system_seeded()).count() as u64;
    let votes_cast = votes::count_distinct_voters(conn, round.id).await?;

    let answers = match round.status {
        RoundStatus::Pending | RoundStatus::Answering => Vec::new(),
        RoundStatus::Voting => answer_views(round_answers, false),
        RoundStatus::Completed => answer_views(round_answers, true),
    };
    let scores = if round.status == RoundStatus::Completed {
        round_scores::list_by_round(conn, round.id).await?
    } else {
        Vec::new()
    };

    let remaining_ms = match round.status {
        RoundStatus::Answering | RoundStatus::Voting => timer.remaining_ms(now),
        RoundStatus::Pending | RoundStatus::Completed => 0,
    };

    Ok(RoundSnapshot {
        prompt: question.prompt,
        deadline: timer.deadline(),
        remaining_ms,
        answers_submitted,
        votes_cast,
        answers,
        scores,
        round,
    })
}

/// Sorted by normalised text so row order does not give away the seeded answer.
fn answer_views(mut list: Vec<Answer>, reveal: bool) -> Vec<AnswerView> {
    list.sort_by_cached_key(|a| (answer_text::normalize(&a.text), a.id));
    list.into_iter()
        .map(|a| AnswerView {
            id: a.id,
            author_id: if reveal { a.player_id } else { None },
            is_correct: reveal.then_some(a.is_correct),
            text: a.text,
        })
        .collect()
}

fn clean_display_name(raw: &str) -> Result<String, AppError> {
    answer_text::clean(raw, MAX_DISPLAY_NAME_CHARS).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidDisplayName,
            format!("Display name must be 1-{MAX_DISPLAY_NAME_CHARS} characters"),
        )
        .into()
    })
}
