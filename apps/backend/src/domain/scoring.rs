//! Round scoring: turns a round's answers and votes into per-player deltas.
//!
//! Pure and deterministic. The service layer applies the result exactly once,
//! inside the transaction that completes the round.

use std::collections::{BTreeMap, HashMap};

use crate::config::engine::ScoringRules;

/// One answer as the scorer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredAnswer {
    pub answer_id: i64,
    /// `None` for the system-seeded correct answer
    pub author_id: Option<i64>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredVote {
    pub vote_id: i64,
    pub voter_id: i64,
    pub answer_id: i64,
}

/// Breakdown of what one player earned in a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerDelta {
    pub correct_guess: i32,
    pub fooled: i32,
    pub perfect_fake: i32,
    pub winner_bonus: i32,
}

impl PlayerDelta {
    /// Points before the winner bonus.
    pub fn base(&self) -> i32 {
        self.correct_guess + self.fooled + self.perfect_fake
    }

    pub fn total(&self) -> i32 {
        self.base() + self.winner_bonus
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundScoring {
    /// Only players who earned something appear here.
    pub deltas: BTreeMap<i64, PlayerDelta>,
    /// Points each vote earned its voter, keyed by vote id.
    pub vote_points: BTreeMap<i64, i32>,
}

impl RoundScoring {
    pub fn total_for(&self, player_id: i64) -> i32 {
        self.deltas.get(&player_id).map_or(0, PlayerDelta::total)
    }

    pub fn winners(&self) -> Vec<i64> {
        self.deltas
            .iter()
            .filter(|(_, d)| d.winner_bonus > 0)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Compute deltas for a closed round.
///
/// Votes naming an answer outside `answers` are ignored. A fake answer is any
/// non-correct answer with an author; a voter who picked the correct answer
/// earns `correct_guess`, each fake pays its author `fooled` per voter or
/// `perfect_fake` when nobody picked it. Every player tied at the highest
/// positive base total also receives `round_winner`.
pub fn score_round(
    answers: &[ScoredAnswer],
    votes: &[ScoredVote],
    rules: &ScoringRules,
) -> RoundScoring {
    let by_id: HashMap<i64, &ScoredAnswer> = answers.iter().map(|a| (a.answer_id, a)).collect();
    let mut votes_per_answer: HashMap<i64, i32> = HashMap::new();
    let mut result = RoundScoring::default();

    for vote in votes {
        let Some(answer) = by_id.get(&vote.answer_id) else {
            continue;
        };
        *votes_per_answer.entry(answer.answer_id).or_default() += 1;
        let earned = if answer.is_correct {
            rules.correct_guess
        } else {
            0
        };
        result.vote_points.insert(vote.vote_id, earned);
        if earned > 0 {
            result.deltas.entry(vote.voter_id).or_default().correct_guess += earned;
        }
    }

    for answer in answers.iter().filter(|a| !a.is_correct) {
        let Some(author) = answer.author_id else {
            continue;
        };
        let fooled = votes_per_answer.get(&answer.answer_id).copied().unwrap_or(0);
        if fooled == 0 {
            if rules.perfect_fake > 0 {
                result.deltas.entry(author).or_default().perfect_fake += rules.perfect_fake;
            }
        } else if rules.fooled > 0 {
            result.deltas.entry(author).or_default().fooled += rules.fooled * fooled;
        }
    }

    let top = result.deltas.values().map(PlayerDelta::base).max().unwrap_or(0);
    if top > 0 {
        for delta in result.deltas.values_mut() {
            if delta.base() == top {
                delta.winner_bonus = rules.round_winner;
            }
        }
    }

    result
}
