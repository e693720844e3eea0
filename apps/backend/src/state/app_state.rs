use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::gate::AuthGate;
use crate::auth::keys::TokenKeyProvider;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Signing key source for issuing and verifying session tokens
    pub keys: Arc<dyn TokenKeyProvider>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, keys: Arc<dyn TokenKeyProvider>) -> Self {
        Self { db, keys }
    }

    pub fn gate(&self) -> AuthGate {
        AuthGate::new(Arc::clone(&self.keys))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
