//! Vote repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::votes_sea as votes_adapter;
use crate::domain::scoring::ScoredVote;
use crate::entities::votes;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub id: i64,
    pub round_id: i64,
    pub voter_id: i64,
    pub answer_id: i64,
    pub points_earned: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Vote {
    pub fn as_scored(&self) -> ScoredVote {
        ScoredVote {
            vote_id: self.id,
            voter_id: self.voter_id,
            answer_id: self.answer_id,
        }
    }

    fn to_model(&self) -> votes::Model {
        votes::Model {
            id: self.id,
            round_id: self.round_id,
            voter_id: self.voter_id,
            answer_id: self.answer_id,
            points_earned: self.points_earned,
            created_at: self.created_at,
        }
    }
}

pub async fn list_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Vote>, DomainError> {
    let rows = votes_adapter::list_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Vote::from).collect())
}

pub async fn count_distinct_voters<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(votes_adapter::count_distinct_voters(conn, round_id).await?)
}

pub async fn find_by_round_and_voter<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    voter_id: i64,
) -> Result<Option<Vote>, DomainError> {
    Ok(
        votes_adapter::find_by_round_and_voter(conn, round_id, voter_id)
            .await?
            .map(Vote::from),
    )
}

pub async fn create_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    voter_id: i64,
    answer_id: i64,
    now: OffsetDateTime,
) -> Result<Vote, DomainError> {
    let dto = votes_adapter::VoteCreate {
        round_id,
        voter_id,
        answer_id,
    };
    Ok(Vote::from(votes_adapter::create_vote(conn, dto, now).await?))
}

pub async fn set_points_earned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    vote: &Vote,
    points: i32,
) -> Result<Vote, DomainError> {
    let model = votes_adapter::set_points_earned(conn, vote.to_model(), points).await?;
    Ok(Vote::from(model))
}

impl From<votes::Model> for Vote {
    fn from(model: votes::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            voter_id: model.voter_id,
            answer_id: model.answer_id,
            points_earned: model.points_earned,
            created_at: model.created_at,
        }
    }
}
