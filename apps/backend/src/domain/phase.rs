//! Game and round status machines plus the quorum decision.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

impl GameStatus {
    fn rank(self) -> u8 {
        match self {
            GameStatus::Waiting => 0,
            GameStatus::Playing => 1,
            GameStatus::Finished => 2,
        }
    }

    /// Status only advances waiting -> playing -> finished.
    pub fn can_become(self, next: GameStatus) -> bool {
        next.rank() == self.rank() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Pending,
    Answering,
    Voting,
    Completed,
}

impl RoundStatus {
    fn rank(self) -> u8 {
        match self {
            RoundStatus::Pending => 0,
            RoundStatus::Answering => 1,
            RoundStatus::Voting => 2,
            RoundStatus::Completed => 3,
        }
    }

    pub fn can_become(self, next: RoundStatus) -> bool {
        next.rank() == self.rank() + 1
    }

    pub fn is_terminal(self) -> bool {
        self == RoundStatus::Completed
    }
}

/// The exit action a phase decision selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseExit {
    /// Seed the correct answer and open voting
    CloseAnswering,
    /// Score, complete the round and progress the game
    CloseVoting,
}

/// Decide whether the round's active phase exits.
///
/// `submissions` is the non-system answer count while answering and the
/// distinct voter count while voting. `forced` skips the quorum comparison.
/// Pending and completed rounds never exit.
pub fn decide_exit(
    status: RoundStatus,
    submissions: u64,
    required_players: i16,
    forced: bool,
) -> Option<PhaseExit> {
    let quorum_met = forced || submissions >= required_players.max(0) as u64;
    match status {
        RoundStatus::Answering if quorum_met => Some(PhaseExit::CloseAnswering),
        RoundStatus::Voting if quorum_met => Some(PhaseExit::CloseVoting),
        _ => None,
    }
}

/// What the game does once a round completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameProgress {
    NextRound(i16),
    Finished,
}

pub fn progress_after_round(current_round: i16, round_count: i16) -> GameProgress {
    if current_round >= round_count {
        GameProgress::Finished
    } else {
        GameProgress::NextRound(current_round + 1)
    }
}

/// Smallest roster that can play a round.
pub const MIN_QUORUM: i16 = 2;
