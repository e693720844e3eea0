//! Persistence seam for the merge updater.
//!
//! Fetch by primary key, merge in memory, write the full row back. There is no
//! version column or transaction around the read-modify-write, so two
//! concurrent edits of one row race and the later write wins.

use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::errors::domain::DomainError;
use crate::repos::merge::{merge, Mergeable};
use crate::repos::{orders, products, users};

#[async_trait]
pub trait RecordStore<E>: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<E>, DomainError>;

    /// Write the full row for an existing record.
    async fn save(&self, record: E) -> Result<E, DomainError>;
}

/// Fetch `incoming.id()`, merge `incoming` into it and persist the result.
///
/// A missing row yields `NotFound` and nothing is written.
pub async fn merge_and_save<E, S>(store: &S, incoming: &E) -> Result<E, DomainError>
where
    E: Mergeable,
    S: RecordStore<E> + ?Sized,
{
    let id = incoming.id();
    let mut existing = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(E::not_found_kind(), "record not found"))?;

    let changed = merge(&mut existing, incoming);
    debug!(record_id = id, changed = ?changed, "merged edit payload");

    store.save(existing).await
}

/// [`RecordStore`] over any sea-orm connection.
pub struct SeaStore<'c, C> {
    conn: &'c C,
}

impl<'c, C> SeaStore<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> RecordStore<users::User> for SeaStore<'_, C> {
    async fn get_by_id(&self, id: i64) -> Result<Option<users::User>, DomainError> {
        users::find_by_id(self.conn, id).await
    }

    async fn save(&self, record: users::User) -> Result<users::User, DomainError> {
        users::save(self.conn, record).await
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> RecordStore<products::Product> for SeaStore<'_, C> {
    async fn get_by_id(&self, id: i64) -> Result<Option<products::Product>, DomainError> {
        products::find_by_id(self.conn, id).await
    }

    async fn save(&self, record: products::Product) -> Result<products::Product, DomainError> {
        products::save(self.conn, record).await
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> RecordStore<orders::Order> for SeaStore<'_, C> {
    async fn get_by_id(&self, id: i64) -> Result<Option<orders::Order>, DomainError> {
        orders::find_by_id(self.conn, id).await
    }

    async fn save(&self, record: orders::Order) -> Result<orders::Order, DomainError> {
        orders::save(self.conn, record).await
    }
}
