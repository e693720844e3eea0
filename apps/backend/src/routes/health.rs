use actix_web::{web, HttpResponse};
use migration::count_applied_migrations;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use crate::error::AppError;
use crate::http::success;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    /// `None` when the migration table could not be read.
    migrations: Option<usize>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(success("SUCCESS", check(&app_state).await))
}

async fn check(app_state: &AppState) -> HealthResponse {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let db = &app_state.db;
    let (mut db_status, mut db_error) = match db
        .query_one(sea_orm::Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 as health_check".to_string(),
        ))
        .await
    {
        Ok(_) => ("ok".to_string(), None),
        Err(e) => ("error".to_string(), Some(format!("DB query failed: {e}"))),
    };

    let migrations = match count_applied_migrations(db).await {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(error = %e, "failed to count applied migrations");
            db_status = "error".to_string();
            db_error.get_or_insert_with(|| format!("Migration count failed: {e}"));
            None
        }
    };

    HealthResponse {
        status: "ok".to_string(),
        app_version,
        db: db_status,
        db_error,
        migrations,
        time,
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{ConnectionTrait, Statement};

    use super::check;
    use crate::auth::keys::{StaticKeyProvider, TokenKeyProvider};
    use crate::infra::db::{bootstrap_db, connect_db};
    use crate::state::app_state::AppState;

    fn state(db: sea_orm::DatabaseConnection) -> AppState {
        let keys: Arc<dyn TokenKeyProvider> = Arc::new(StaticKeyProvider::new("k"));
        AppState::new(db, keys)
    }

    #[tokio::test]
    async fn migrated_db_reports_count() {
        let db = bootstrap_db("sqlite::memory:").await.unwrap();
        let report = check(&state(db)).await;

        assert_eq!(report.db, "ok");
        assert!(report.db_error.is_none());
        assert!(report.migrations.unwrap_or(0) >= 1);
    }

    #[tokio::test]
    async fn unreadable_migration_table_is_an_error_not_zero() {
        let db = connect_db("sqlite::memory:").await.unwrap();
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "CREATE TABLE seaql_migrations (unrelated INTEGER)",
        ))
        .await
        .unwrap();

        let report = check(&state(db)).await;

        assert_eq!(report.migrations, None);
        assert_eq!(report.db, "error");
        assert!(report
            .db_error
            .as_deref()
            .is_some_and(|e| e.starts_with("Migration count failed")));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["migrations"].is_null());
    }
}
