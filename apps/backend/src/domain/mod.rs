//! Domain layer: pure round-engine logic, no I/O.

pub mod answer_text;
pub mod leadership;
pub mod phase;
pub mod scoring;
pub mod timer;


// Re-exports for ergonomics
pub use phase::{GameStatus, PhaseExit, RoundStatus};
pub use scoring::{score_round, PlayerDelta, RoundScoring};
pub use timer::PhaseTimer;
