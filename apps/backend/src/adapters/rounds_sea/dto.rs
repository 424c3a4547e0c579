//! DTOs for rounds_sea adapter.

use time::OffsetDateTime;

use crate::entities::rounds::RoundStatus;

#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub game_id: i64,
    pub round_number: i16,
    pub question_id: i64,
    pub status: RoundStatus,
    pub required_players: i16,
    pub timer_starts_at: OffsetDateTime,
    pub timer_duration_secs: i32,
}
