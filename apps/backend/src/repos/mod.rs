//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod answers;
pub mod games;
pub mod players;
pub mod questions;
pub mod round_scores;
pub mod rounds;
pub mod votes;
