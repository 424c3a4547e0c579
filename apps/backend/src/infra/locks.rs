//! In-process keyed mutexes for rounds and games.
//!
//! Every decision path on a round holds the round lock, then the game lock,
//! for its whole evaluate-and-mutate sequence. Keyed locks are taken before
//! the database transaction begins so a waiting task never pins a pooled
//! connection. On Postgres the same order is repeated with row locks inside
//! the transaction so separate processes serialize too.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

type LockMap = Arc<DashMap<i64, Arc<Mutex<()>>>>;

/// A set of async mutexes addressed by row id.
#[derive(Debug, Default, Clone)]
pub struct KeyedLocks {
    name: &'static str,
    map: LockMap,
}

impl KeyedLocks {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            map: Arc::new(DashMap::new()),
        }
    }

    /// Wait for exclusive ownership of `key`.
    pub async fn lock(&self, key: i64) -> KeyedGuard {
        let mutex = self.map.entry(key).or_default().clone();
        let guard = mutex.lock_owned().await;
        trace!(lock = self.name, key, "keyed lock acquired");
        KeyedGuard {
            name: self.name,
            key,
            map: self.map.clone(),
            guard: Some(guard),
        }
    }

    /// Number of keys with a live mutex (held or awaited).
    pub fn live_keys(&self) -> usize {
        self.map.len()
    }
}

/// Releases the key on drop and forgets idle entries.
#[derive(Debug)]
pub struct KeyedGuard {
    name: &'static str,
    key: i64,
    map: LockMap,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map still references the mutex: nobody holds or waits on it.
        self.map
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
        trace!(lock = self.name, key = self.key, "keyed lock released");
    }
}

/// Round and game lock tables with the fixed acquisition order.
#[derive(Debug, Clone)]
pub struct LockRegistry {
    rounds: KeyedLocks,
    games: KeyedLocks,
}

/// Both guards of a round-scoped operation; released game first, then round.
#[derive(Debug)]
pub struct RoundScope {
    _game: KeyedGuard,
    _round: KeyedGuard,
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LockRegistry {
    pub fn new() -> Self {
        Self {
            rounds: KeyedLocks::new("round"),
            games: KeyedLocks::new("game"),
        }
    }

    /// Round lock, then game lock.
    pub async fn lock_round(&self, round_id: i64, game_id: i64) -> RoundScope {
        let round = self.rounds.lock(round_id).await;
        let game = self.games.lock(game_id).await;
        RoundScope {
            _game: game,
            _round: round,
        }
    }

    /// Game lock alone, for operations that never touch a round's phase.
    pub async fn lock_game(&self, game_id: i64) -> KeyedGuard {
        self.games.lock(game_id).await
    }

    pub fn live_round_locks(&self) -> usize {
        self.rounds.live_keys()
    }

    pub fn live_game_locks(&self) -> usize {
        self.games.live_keys()
    }
}
