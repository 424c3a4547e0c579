//! Database selection and connection strings, driven by environment variables.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which database backend to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// PostgreSQL (production)
    Postgres,
    /// SQLite file on disk
    SqliteFile,
    /// SQLite in-memory (tests); one connection, one database
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "unsupported database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl DbKind {
    /// `BLUFF_DB_KIND`, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("BLUFF_DB_KIND") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(DbKind::Postgres),
        }
    }
}

/// Build the connection URL for `kind` from the environment.
pub fn make_conn_spec(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("POSTGRES_DB")?;
            let username = must_var("POSTGRES_USER")?;
            let password = must_var("POSTGRES_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let file = env::var("BLUFF_SQLITE_FILE").unwrap_or_else(|_| "bluff.sqlite".to_string());
            Ok(format!("sqlite://{file}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// SQLite file URL for an explicit path (tests, CLI).
pub fn sqlite_file_spec(path: &str) -> String {
    format!("sqlite://{path}?mode=rwc")
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
