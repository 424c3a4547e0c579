//! SeaORM adapters: thin query helpers returning entity models and `DbErr`.

pub mod answers_sea;
pub mod games_sea;
pub mod players_sea;
pub mod questions_sea;
pub mod round_scores_sea;
pub mod rounds_sea;
pub mod votes_sea;
