//! Order repository functions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::orders;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::merge::{empty_str, empty_vec, zero_f64, zero_i64, FieldRule, Mergeable};

/// Cart line captured when the order was placed.
///
/// `product` is a frozen copy of the catalogue entry as the client saw it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub sizing: String,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub product: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: i64,
    pub total: f64,
    pub status: String,
    pub snapshots: Vec<CartLine>,
    pub user_id: i64,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

impl Mergeable for Order {
    fn not_found_kind() -> NotFoundKind {
        NotFoundKind::Order
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn merge_rules() -> Vec<FieldRule<Self>> {
        vec![
            crate::field_rule!(Order, status, empty_str),
            crate::field_rule!(Order, user_id, zero_i64),
            crate::field_rule!(Order, total, zero_f64),
            crate::field_rule!(Order, snapshots, empty_vec),
        ]
    }
}

fn encode_snapshots(lines: &[CartLine]) -> Result<String, DomainError> {
    if lines.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string(lines).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Json".into()),
            format!("failed to encode order snapshots: {e}"),
        )
    })
}

fn decode_snapshots(raw: &str) -> Result<Vec<CartLine>, DomainError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("stored order snapshots are not valid JSON: {e}"),
        )
    })
}

impl TryFrom<orders::Model> for Order {
    type Error = DomainError;

    fn try_from(model: orders::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            total: model.total,
            status: model.status,
            snapshots: decode_snapshots(&model.snapshots)?,
            user_id: model.user_id,
            created_at: Some(model.created_at),
            updated_at: Some(model.updated_at),
        })
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: i64,
) -> Result<Option<Order>, DomainError> {
    orders::Entity::find_by_id(order_id)
        .one(conn)
        .await?
        .map(Order::try_from)
        .transpose()
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Order>, DomainError> {
    orders::Entity::find()
        .order_by_asc(orders::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(Order::try_from)
        .collect()
}

pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Order>, DomainError> {
    orders::Entity::find()
        .filter(orders::Column::UserId.eq(user_id))
        .order_by_asc(orders::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(Order::try_from)
        .collect()
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order: Order,
) -> Result<Order, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = orders::ActiveModel {
        id: NotSet,
        total: Set(order.total),
        status: Set(order.status),
        snapshots: Set(encode_snapshots(&order.snapshots)?),
        user_id: Set(order.user_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Order::try_from(active.insert(conn).await?)
}

pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order: Order,
) -> Result<Order, DomainError> {
    let active = orders::ActiveModel {
        id: Set(order.id),
        total: Set(order.total),
        status: Set(order.status),
        snapshots: Set(encode_snapshots(&order.snapshots)?),
        user_id: Set(order.user_id),
        created_at: NotSet,
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    Order::try_from(active.update(conn).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: i64,
) -> Result<Order, DomainError> {
    let order = find_by_id(conn, order_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Order, "record not found"))?;
    orders::Entity::delete_by_id(order_id).exec(conn).await?;
    Ok(order)
}
