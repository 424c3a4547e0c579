//! Round engine tuning: phase durations, point values and force-advance policy.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Points awarded by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    /// Per voter who picked the correct answer
    pub correct_guess: i32,
    /// Per voter fooled by a fake answer, paid to its author
    pub fooled: i32,
    /// Paid to the author of a fake answer nobody picked
    pub perfect_fake: i32,
    /// Paid to every player tied at the round's top delta
    pub round_winner: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            correct_guess: 1000,
            fooled: 500,
            perfect_fake: 750,
            round_winner: 250,
        }
    }
}

/// What force-advance does when the phase deadline has not passed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceAdvancePolicy {
    /// Any caller may close the phase at any time
    #[default]
    Unconditional,
    /// Reject with `not_expired` until the server-side deadline (minus skew) passes
    AfterDeadline,
}

impl FromStr for ForceAdvancePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unconditional" => Ok(Self::Unconditional),
            "after-deadline" | "after_deadline" => Ok(Self::AfterDeadline),
            other => Err(AppError::config(format!(
                "unknown force-advance policy '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub answer_seconds: i32,
    pub vote_seconds: i32,
    pub scoring: ScoringRules,
    pub force_advance: ForceAdvancePolicy,
    /// Tolerance for client clocks running ahead of the server
    pub clock_skew_ms: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            answer_seconds: 60,
            vote_seconds: 30,
            scoring: ScoringRules::default(),
            force_advance: ForceAdvancePolicy::default(),
            clock_skew_ms: 1500,
        }
    }
}

impl EngineConfig {
    /// Read overrides from `BLUFF_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            answer_seconds: parse_var("BLUFF_ANSWER_SECONDS", defaults.answer_seconds)?,
            vote_seconds: parse_var("BLUFF_VOTE_SECONDS", defaults.vote_seconds)?,
            scoring: ScoringRules {
                correct_guess: parse_var("BLUFF_POINTS_CORRECT", defaults.scoring.correct_guess)?,
                fooled: parse_var("BLUFF_POINTS_FOOLED", defaults.scoring.fooled)?,
                perfect_fake: parse_var(
                    "BLUFF_POINTS_PERFECT_FAKE",
                    defaults.scoring.perfect_fake,
                )?,
                round_winner: parse_var(
                    "BLUFF_POINTS_ROUND_WINNER",
                    defaults.scoring.round_winner,
                )?,
            },
            force_advance: match env::var("BLUFF_FORCE_ADVANCE_POLICY") {
                Ok(raw) => raw.parse()?,
                Err(_) => defaults.force_advance,
            },
            clock_skew_ms: parse_var("BLUFF_CLOCK_SKEW_MS", defaults.clock_skew_ms)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.answer_seconds <= 0 || self.vote_seconds <= 0 {
            return Err(AppError::config("phase durations must be positive"));
        }
        if self.clock_skew_ms < 0 {
            return Err(AppError::config("clock skew tolerance must not be negative"));
        }
        let s = &self.scoring;
        if s.correct_guess < 0 || s.fooled < 0 || s.perfect_fake < 0 || s.round_winner < 0 {
            return Err(AppError::config("point values must not be negative"));
        }
        if s.perfect_fake <= s.fooled {
            return Err(AppError::config(format!(
                "perfect-fake bonus ({}) must exceed the per-fooled award ({})",
                s.perfect_fake, s.fooled
            )));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value '{raw}'"))),
        Err(_) => Ok(default),
    }
}
