//! Successor selection for the round-creation leader.

use time::OffsetDateTime;

/// A roster entry as leadership election sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub player_id: i64,
    pub is_connected: bool,
    pub connected_since: Option<OffsetDateTime>,
    pub joined_at: OffsetDateTime,
}

impl Candidate {
    fn connected_at(&self) -> OffsetDateTime {
        self.connected_since.unwrap_or(self.joined_at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadershipDecision {
    Promote(i64),
    /// The reported player is no longer the leader, or is connected again
    NotNeeded,
    /// Nobody connected remains; leadership stays as is
    NoEligiblePlayer,
}

/// Decide leadership after `departed` was reported disconnected.
///
/// A report about a player who is not the leader, or who is connected
/// per the roster, is stale and yields `NotNeeded`. Otherwise the connected
/// host wins, then the player connected the longest, ties broken by lower id.
pub fn elect_successor(
    current_leader: Option<i64>,
    host_id: Option<i64>,
    departed: i64,
    roster: &[Candidate],
) -> LeadershipDecision {
    if current_leader != Some(departed) {
        return LeadershipDecision::NotNeeded;
    }
    if roster
        .iter()
        .any(|c| c.player_id == departed && c.is_connected)
    {
        return LeadershipDecision::NotNeeded;
    }

    let mut eligible: Vec<&Candidate> = roster
        .iter()
        .filter(|c| c.is_connected && c.player_id != departed)
        .collect();

    if let Some(host) = host_id {
        if eligible.iter().any(|c| c.player_id == host) {
            return LeadershipDecision::Promote(host);
        }
    }

    eligible.sort_by_key(|c| (c.connected_at(), c.player_id));
    match eligible.first() {
        Some(c) => LeadershipDecision::Promote(c.player_id),
        None => LeadershipDecision::NoEligiblePlayer,
    }
}
