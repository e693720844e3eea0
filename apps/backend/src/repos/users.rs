//! User repository functions (generic over ConnectionTrait).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::merge::{empty_str, zero_f64, FieldRule, Mergeable};

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_ADMIN: &str = "admin";

/// User domain model
///
/// `password_hash` is an argon2 PHC string; callers hash before it gets here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub dob: String,
    pub role: String,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

impl Mergeable for User {
    fn not_found_kind() -> NotFoundKind {
        NotFoundKind::User
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn merge_rules() -> Vec<FieldRule<Self>> {
        vec![
            crate::field_rule!(User, username, empty_str),
            crate::field_rule!(User, password_hash, empty_str),
            crate::field_rule!(User, dob, empty_str),
            crate::field_rule!(User, role, empty_str),
            crate::field_rule!(User, chest, zero_f64),
            crate::field_rule!(User, waist, zero_f64),
            crate::field_rule!(User, hip, zero_f64),
        ]
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users::Entity::find_by_id(user_id).one(conn).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await?;
    Ok(user.map(User::from))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<User>, DomainError> {
    let rows = users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(User::from).collect())
}

/// Insert a new user; `user.id` and timestamps are ignored.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: User,
) -> Result<User, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = users::ActiveModel {
        id: NotSet,
        username: Set(user.username),
        password_hash: Set(user.password_hash),
        dob: Set(user.dob),
        role: Set(user.role),
        chest: Set(user.chest),
        waist: Set(user.waist),
        hip: Set(user.hip),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active.insert(conn).await?;
    Ok(User::from(model))
}

/// Overwrite every mutable column of an existing row.
pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: User,
) -> Result<User, DomainError> {
    let active = users::ActiveModel {
        id: Set(user.id),
        username: Set(user.username),
        password_hash: Set(user.password_hash),
        dob: Set(user.dob),
        role: Set(user.role),
        chest: Set(user.chest),
        waist: Set(user.waist),
        hip: Set(user.hip),
        created_at: NotSet,
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    let model = active.update(conn).await?;
    Ok(User::from(model))
}

/// Hard delete. Returns the removed row.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    let user = find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "record not found"))?;
    users::Entity::delete_by_id(user_id).exec(conn).await?;
    Ok(user)
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            dob: model.dob,
            role: model.role,
            chest: model.chest,
            waist: model.waist,
            hip: model.hip,
            created_at: Some(model.created_at),
            updated_at: Some(model.updated_at),
        }
    }
}
