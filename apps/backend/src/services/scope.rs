//! Lock-then-transaction wrappers shared by the command services.
//!
//! Keyed locks are acquired first (round before game), then the transaction
//! runs; events gathered inside are published only after commit.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::db::txn::{with_txn, TxnFuture};
use crate::error::AppError;
use crate::events::GameEvent;
use crate::repos::rounds;
use crate::state::app_state::AppState;

/// Output of a scoped unit of work: its value plus events to publish.
pub type Scoped<R> = (R, Vec<GameEvent>);

/// Run `f` holding the round lock then the game lock of `round_id`.
pub async fn in_round_scope<R, F>(state: &AppState, round_id: i64, f: F) -> Result<R, AppError>
where
    R: Send,
    F: for<'t> FnOnce(&'t DatabaseTransaction, OffsetDateTime) -> TxnFuture<'t, Scoped<R>, AppError>
        + Send,
{
    // game_id never changes for a round, so it is safe to read before locking
    let game_id = rounds::require_round(require_db(state)?, round_id)
        .await?
        .game_id;
    let _scope = state.locks.lock_round(round_id, game_id).await;
    let now = OffsetDateTime::now_utc();
    let (value, events) = with_txn(state, move |txn| f(txn, now)).await?;
    state.events.publish_all(events);
    Ok(value)
}

/// Run `f` holding the game lock of `game_id`.
pub async fn in_game_scope<R, F>(state: &AppState, game_id: i64, f: F) -> Result<R, AppError>
where
    R: Send,
    F: for<'t> FnOnce(&'t DatabaseTransaction, OffsetDateTime) -> TxnFuture<'t, Scoped<R>, AppError>
        + Send,
{
    let _guard = state.locks.lock_game(game_id).await;
    let now = OffsetDateTime::now_utc();
    let (value, events) = with_txn(state, move |txn| f(txn, now)).await?;
    state.events.publish_all(events);
    Ok(value)
}
