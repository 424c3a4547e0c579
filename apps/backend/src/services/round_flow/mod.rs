//! Round flow: the server-authoritative phase machine for a round.
//!
//! In-transaction methods (`record_*`, `evaluate`, `force`, exit actions,
//! scoring) assume the caller already holds the round and game locks.
//! `orchestration` wraps them with lock acquisition, the transaction and
//! post-commit event publication.

mod evaluator;
mod exit_actions;
mod forced;
mod orchestration;
mod round_creation;
mod scoring;
mod submissions;

use serde::Serialize;

use crate::config::engine::EngineConfig;
use crate::domain::{GameStatus, RoundStatus};

/// Round flow service - generic over ConnectionTrait for transaction support.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundFlowService {
    engine: EngineConfig,
}

impl RoundFlowService {
    pub fn new(engine: EngineConfig) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }
}

/// What a phase evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// Quorum not met, or the round is pending/completed
    Unchanged,
    /// Answering closed: correct answer seeded, voting timer running
    VotingOpened,
    /// Voting closed: round scored and completed
    RoundCompleted {
        game_status: GameStatus,
        current_round: i16,
    },
}

impl PhaseOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, PhaseOutcome::Unchanged)
    }
}

/// Result of a force-advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ForceAdvanceOutcome {
    Advanced { phase: PhaseOutcome },
    /// Round already completed; nothing to do
    AlreadyCompleted,
    /// Round has not opened its first phase
    NotStarted,
    /// Caller's countdown was for a phase the round has already left
    PhaseAlreadyClosed { status: RoundStatus },
    /// Deadline-gated policy and the server deadline has not passed
    NotExpired { remaining_ms: i64 },
}

/// Receipt for an accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerReceipt {
    pub answer_id: i64,
    pub round_id: i64,
    pub phase: PhaseOutcome,
}

/// Receipt for an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub vote_id: i64,
    pub round_id: i64,
    pub phase: PhaseOutcome,
}
