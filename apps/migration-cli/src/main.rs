use clap::{Parser, Subcommand};
use migration::sea_orm::{Database, DatabaseConnection, DbErr};
use migration::{migrate, provision_signing_key, MigrationCommand};
use tracing::{error, info};

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Roll back the last applied migration
    Down,
    /// Drop all tables and re-apply every migration
    Fresh,
    /// Roll back every applied migration
    Reset,
    /// Reset then re-apply every migration
    Refresh,
    /// Show applied / pending migrations
    Status,
    /// Store the token signing key in the credentials table
    ProvisionKey {
        /// Secret used to sign session tokens
        secret: String,
    },
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Storefront database migration tool")]
struct Args {
    /// Database URL (falls back to DATABASE_URL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

/// Execute one command, returning its name alongside the outcome.
async fn run(db: &DatabaseConnection, command: Command) -> (&'static str, Result<(), DbErr>) {
    match command {
        Command::Up => ("up", migrate(db, MigrationCommand::Up).await),
        Command::Down => ("down", migrate(db, MigrationCommand::Down).await),
        Command::Fresh => ("fresh", migrate(db, MigrationCommand::Fresh).await),
        Command::Reset => ("reset", migrate(db, MigrationCommand::Reset).await),
        Command::Refresh => ("refresh", migrate(db, MigrationCommand::Refresh).await),
        Command::Status => ("status", migrate(db, MigrationCommand::Status).await),
        Command::ProvisionKey { secret } => {
            info!("provisioning signing key");
            ("provision-key", provision_signing_key(db, &secret).await)
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if args.database_url.starts_with("sqlite::memory:") {
        eprintln!("❌ SQLite in-memory databases are not supported for CLI operations.");
        eprintln!("   Each CLI run would migrate a fresh database that is discarded on exit.");
        std::process::exit(2);
    }

    let db = match Database::connect(&args.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "failed to connect");
            std::process::exit(1);
        }
    };

    let (label, result) = run(&db, args.command).await;

    match result {
        Ok(()) => info!(command = label, "done"),
        Err(e) => {
            error!(command = label, error = %e, "command failed");
            std::process::exit(1);
        }
    }
}
