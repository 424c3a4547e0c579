//! DTOs for answers_sea adapter.

#[derive(Debug, Clone)]
pub struct AnswerCreate {
    pub round_id: i64,
    /// `None` for the system-seeded correct answer
    pub player_id: Option<i64>,
    pub text: String,
    pub is_correct: bool,
}
