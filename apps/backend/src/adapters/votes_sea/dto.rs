//! DTOs for votes_sea adapter.

#[derive(Debug, Clone)]
pub struct VoteCreate {
    pub round_id: i64,
    pub voter_id: i64,
    pub answer_id: i64,
}
