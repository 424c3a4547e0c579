//! DTOs for games_sea adapter.

#[derive(Debug, Clone)]
pub struct GameCreate {
    pub join_code: String,
    pub round_count: i16,
    pub max_players: i16,
}
