//! Signing key supply.
//!
//! The HMAC secret lives in the credential store under the fixed type tag
//! [`SIGNING_KEY_CREDENTIAL_TYPE`]. It is read on every authenticated request
//! with no caching, so rotating the row takes effect immediately.

use std::fmt;

use async_trait::async_trait;
use migration::SIGNING_KEY_CREDENTIAL_TYPE;
use sea_orm::DatabaseConnection;

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::credentials;

/// HMAC secret used to sign and verify session tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Supplies the current signing key.
#[async_trait]
pub trait TokenKeyProvider: Send + Sync {
    async fn signing_key(&self) -> Result<SigningKey, DomainError>;
}

/// Reads the key from the `credentials` table.
#[derive(Clone)]
pub struct CredentialKeyProvider {
    db: DatabaseConnection,
}

impl CredentialKeyProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenKeyProvider for CredentialKeyProvider {
    async fn signing_key(&self) -> Result<SigningKey, DomainError> {
        let secret = credentials::find_secret_by_type(&self.db, SIGNING_KEY_CREDENTIAL_TYPE)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Credential, "NOTE: Failed to get token key")
            })?;

        if secret.is_empty() {
            return Err(DomainError::not_found(
                NotFoundKind::Credential,
                "NOTE: Failed to get token key",
            ));
        }

        Ok(SigningKey::new(secret))
    }
}

/// Holds a fixed key in memory.
#[derive(Clone, Debug)]
pub struct StaticKeyProvider {
    key: SigningKey,
}

impl StaticKeyProvider {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            key: SigningKey::new(secret),
        }
    }
}

#[async_trait]
impl TokenKeyProvider for StaticKeyProvider {
    async fn signing_key(&self) -> Result<SigningKey, DomainError> {
        Ok(self.key.clone())
    }
}
