use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::{AnswerReceipt, RoundFlowService, VoteReceipt};
use crate::domain::answer_text::{self, MAX_ANSWER_CHARS};
use crate::domain::RoundStatus;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};
use crate::events::GameEvent;
use crate::repos::players::{self, Player};
use crate::repos::rounds::{self, Round};
use crate::repos::{answers, questions, votes};

impl RoundFlowService {
    /// Validate and insert a player's fake answer, then evaluate the round.
    pub async fn record_answer<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
        player_id: i64,
        text: &str,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<AnswerReceipt, DomainError> {
        let round = rounds::lock_round(conn, round_id).await?;
        require_status(&round, RoundStatus::Answering)?;
        let player = require_member(conn, &round, player_id).await?;

        let text = answer_text::clean(text, MAX_ANSWER_CHARS).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidAnswer,
                format!("Answer must be 1-{MAX_ANSWER_CHARS} characters"),
            )
        })?;

        let question = questions::require_question(conn, round.question_id).await?;
        if answer_text::matches_truth(&text, &question.correct_answer) {
            warn!(round_id, player_id, "rejected answer matching the truth");
            return Err(DomainError::validation(
                ValidationKind::AnswerMatchesTruth,
                "Your fake answer matches the real answer",
            ));
        }

        if answers::find_by_round_and_player(conn, round_id, player.id)
            .await?
            .is_some()
        {
            warn!(round_id, player_id, "rejected second answer");
            return Err(DomainError::conflict(
                ConflictKind::AlreadyAnswered,
                format!("Player {player_id} already answered round {round_id}"),
            ));
        }

        let answer = answers::create_player_answer(conn, round_id, player.id, text, now).await?;
        info!(round_id, player_id, answer_id = answer.id, "answer recorded");

        let phase = self.evaluate(conn, round_id, now, events).await?;
        Ok(AnswerReceipt {
            answer_id: answer.id,
            round_id,
            phase,
        })
    }

    /// Validate and insert a vote, then evaluate the round.
    pub async fn record_vote<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
        voter_id: i64,
        answer_id: i64,
        now: OffsetDateTime,
        events: &mut Vec<GameEvent>,
    ) -> Result<VoteReceipt, DomainError> {
        let round = rounds::lock_round(conn, round_id).await?;
        require_status(&round, RoundStatus::Voting)?;
        let voter = require_member(conn, &round, voter_id).await?;

        let answer = match answers::find_by_id(conn, answer_id).await? {
            Some(answer) if answer.round_id == round_id => answer,
            _ => {
                warn!(round_id, voter_id, answer_id, "rejected vote for foreign answer");
                return Err(DomainError::validation(
                    ValidationKind::AnswerNotInRound,
                    format!("Answer {answer_id} does not belong to round {round_id}"),
                ));
            }
        };

        if answer.player_id == Some(voter.id) {
            warn!(round_id, voter_id, "rejected self-vote");
            return Err(DomainError::validation(
                ValidationKind::SelfVote,
                "You cannot vote for your own answer",
            ));
        }

        if votes::find_by_round_and_voter(conn, round_id, voter.id)
            .await?
            .is_some()
        {
            warn!(round_id, voter_id, "rejected second vote");
            return Err(DomainError::conflict(
                ConflictKind::AlreadyVoted,
                format!("Player {voter_id} already voted in round {round_id}"),
            ));
        }

        let vote = votes::create_vote(conn, round_id, voter.id, answer.id, now).await?;
        info!(round_id, voter_id, vote_id = vote.id, "vote recorded");

        let phase = self.evaluate(conn, round_id, now, events).await?;
        Ok(VoteReceipt {
            vote_id: vote.id,
            round_id,
            phase,
        })
    }
}

fn require_status(round: &Round, expected: RoundStatus) -> Result<(), DomainError> {
    if round.status == expected {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!(
                "Round {} is {:?}, expected {expected:?}",
                round.id, round.status
            ),
        ))
    }
}

async fn require_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &Round,
    player_id: i64,
) -> Result<Player, DomainError> {
    let player = players::require_player(conn, player_id).await?;
    if player.game_id != round.game_id {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotAMember,
            format!("Player {player_id} is not in game {}", round.game_id),
        ));
    }
    Ok(player)
}
