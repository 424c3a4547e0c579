//! DTOs for players_sea adapter.

#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub game_id: i64,
    pub display_name: String,
}
