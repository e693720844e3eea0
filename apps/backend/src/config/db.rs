use crate::config::must_var;
use crate::error::AppError;

/// Backend selected by a connection URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if url.starts_with("sqlite::memory:") || url.contains("mode=memory") {
            Ok(DbKind::SqliteMemory)
        } else if url.starts_with("sqlite:") {
            Ok(DbKind::SqliteFile)
        } else {
            Err(AppError::config(
                "DATABASE_URL must be a postgres:// or sqlite: URL",
            ))
        }
    }
}

/// Connection URL from `DATABASE_URL`, rejected early if the backend is unsupported.
pub fn database_url() -> Result<String, AppError> {
    let url = must_var("DATABASE_URL")?;
    DbKind::from_url(&url)?;
    Ok(url)
}

/// Strip credentials from a URL before it is logged.
pub fn sanitize_db_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
