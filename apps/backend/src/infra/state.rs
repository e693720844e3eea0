use std::sync::Arc;

use crate::auth::keys::{CredentialKeyProvider, TokenKeyProvider};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    database_url: Option<String>,
    keys: Option<Arc<dyn TokenKeyProvider>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Override the signing key source. Defaults to the credentials table.
    pub fn with_key_provider(mut self, keys: Arc<dyn TokenKeyProvider>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let url = self
            .database_url
            .ok_or_else(|| AppError::config("no database URL configured"))?;

        // single entrypoint: connect + migrate
        let db = bootstrap_db(&url).await?;
        let keys = self
            .keys
            .unwrap_or_else(|| Arc::new(CredentialKeyProvider::new(db.clone())));

        Ok(AppState::new(db, keys))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::build_state;
    use crate::auth::keys::TokenKeyProvider;
    use crate::errors::domain::{DomainError, NotFoundKind};
    use crate::errors::ErrorCode;

    #[tokio::test]
    async fn build_requires_database_url() {
        let err = build_state().build().await.err().unwrap();
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[tokio::test]
    async fn build_with_memory_db() {
        let state = build_state()
            .with_database_url("sqlite::memory:")
            .build()
            .await
            .unwrap();
        let err = state.keys.signing_key().await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound(NotFoundKind::Credential, _)
        ));
    }
}
