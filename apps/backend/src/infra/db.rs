use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{sanitize_db_url, DbKind};
use crate::error::AppError;

/// Open a pool for `url`. Does NOT run migrations.
///
/// An in-memory SQLite database lives only as long as its connection, so
/// that pool is pinned to exactly one connection.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let kind = DbKind::from_url(url)?;

    let mut opts = ConnectOptions::new(url.to_owned());
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match kind {
        DbKind::SqliteMemory => {
            let forever = Duration::from_secs(u64::from(u32::MAX));
            opts.max_connections(1)
                .min_connections(1)
                .idle_timeout(forever)
                .max_lifetime(forever);
        }
        DbKind::SqliteFile => {
            opts.max_connections(1);
        }
        DbKind::Postgres => {
            opts.max_connections(10);
        }
    }

    let conn = Database::connect(opts).await?;
    info!(db = %sanitize_db_url(url), kind = ?kind, "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
