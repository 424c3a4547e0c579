//! Change notifications fanned out per game.
//!
//! Services collect events while their transaction runs and publish them
//! only after commit, so subscribers never observe rolled-back state.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::{GameStatus, RoundStatus};

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStatusChanged {
        game_id: i64,
        round_id: i64,
        round_number: i16,
        status: RoundStatus,
        /// Server-side deadline of the phase just entered, as RFC 3339
        deadline: Option<String>,
    },
    GameProgressed {
        game_id: i64,
        status: GameStatus,
        current_round: i16,
    },
    ScoreChanged {
        game_id: i64,
        player_id: i64,
        delta: i32,
        score: i32,
    },
    LeaderChanged {
        game_id: i64,
        previous_leader_id: Option<i64>,
        leader_id: i64,
    },
    PlayerJoined {
        game_id: i64,
        player_id: i64,
        display_name: String,
    },
    PlayerConnectionChanged {
        game_id: i64,
        player_id: i64,
        is_connected: bool,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> i64 {
        match self {
            GameEvent::RoundStatusChanged { game_id, .. }
            | GameEvent::GameProgressed { game_id, .. }
            | GameEvent::ScoreChanged { game_id, .. }
            | GameEvent::LeaderChanged { game_id, .. }
            | GameEvent::PlayerJoined { game_id, .. }
            | GameEvent::PlayerConnectionChanged { game_id, .. } => *game_id,
        }
    }
}

/// Registry of per-game broadcast channels.
#[derive(Debug, Default)]
pub struct EventHub {
    channels: DashMap<i64, broadcast::Sender<GameEvent>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    pub fn subscribe(&self, game_id: i64) -> broadcast::Receiver<GameEvent> {
        self.channels
            .entry(game_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Deliver committed events. Channels without subscribers are dropped.
    pub fn publish_all(&self, events: Vec<GameEvent>) {
        for event in events {
            let game_id = event.game_id();
            let delivered = match self.channels.get(&game_id) {
                Some(sender) => sender.send(event).is_ok(),
                None => false,
            };
            if !delivered {
                self.channels
                    .remove_if(&game_id, |_, sender| sender.receiver_count() == 0);
                trace!(game_id, "event dropped, no subscribers");
            }
        }
    }
}
