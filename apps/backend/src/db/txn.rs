use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, DbErr, RuntimeErr, TransactionTrait};
use tracing::warn;

use crate::state::app_state::AppState;

/// Boxed future returned by a transaction body.
pub type TxnFuture<'t, R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + Send + 't>>;

/// Execute `f` within a database transaction.
///
/// Commits when the closure returns `Ok`, rolls back on `Err` and hands the
/// original error back to the caller. A state without a database yields a
/// connection error, which maps to `DB_UNAVAILABLE`.
pub async fn with_txn<R, E, F>(state: &AppState, f: F) -> Result<R, E>
where
    R: Send,
    E: From<DbErr> + Send,
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> TxnFuture<'t, R, E> + Send,
{
    let db = state.db().ok_or_else(|| {
        DbErr::Conn(RuntimeErr::Internal("database not configured".to_string()))
    })?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
