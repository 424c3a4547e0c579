use bluff_backend::config::db::DbKind;
use bluff_backend::infra::db::connect_db;
use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use tracing::{error, info};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

/// Targets with a durable schema; in-memory SQLite is not offered.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Bluff database migration tool")]
struct Args {
    #[arg(value_enum)]
    command: Command,

    /// Database backend; connection details come from POSTGRES_* or BLUFF_SQLITE_FILE
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();
    let kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    let conn = match connect_db(kind).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, ?kind, "could not connect");
            std::process::exit(1);
        }
    };

    info!(command = ?args.command, ?kind, "running migrations");
    if let Err(e) = migration::migrate(&conn, args.command.into()).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }
}
