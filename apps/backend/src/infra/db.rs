//! Connection bootstrap: build the pool for the configured backend and migrate it.

use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec, DbKind};
use crate::error::AppError;

const PG_CONNECT_ATTEMPTS: u32 = 10;
const PG_CONNECT_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays.
/// Returns the last error once all attempts are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(10));
    match kind {
        // Every connection to sqlite::memory: is its own database.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(1);
        }
        DbKind::Postgres => {
            opts.max_connections(16).min_connections(1);
        }
    }
    opts
}

/// Connect without migrating.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(kind)?;
    connect_url(kind, url).await
}

async fn connect_url(kind: DbKind, url: String) -> Result<DatabaseConnection, AppError> {
    match kind {
        DbKind::Postgres => {
            retry_connection(
                || {
                    let opts = connect_options(kind, url.clone());
                    async move { Database::connect(opts).await.map_err(AppError::from) }
                },
                PG_CONNECT_ATTEMPTS,
                PG_CONNECT_INTERVAL_MS,
            )
            .await
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            Ok(Database::connect(connect_options(kind, url)).await?)
        }
    }
}

/// Single entrypoint used by `main` and the tests: connect, then migrate up.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(kind)?;
    bootstrap_url(kind, url).await
}

/// Like [`bootstrap_db`] but for an explicit URL (SQLite files in tests).
pub async fn bootstrap_url(kind: DbKind, url: String) -> Result<DatabaseConnection, AppError> {
    let conn = connect_url(kind, url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(db_kind = ?kind, "database ready");
    Ok(conn)
}
