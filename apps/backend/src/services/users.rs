//! Account flows: signup, login, profile edits and admin customer management.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::auth::claims::Role;
use crate::auth::jwt::issue_token;
use crate::auth::keys::TokenKeyProvider;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::repos::store::{merge_and_save, SeaStore};
use crate::repos::users::{self, User, ROLE_ADMIN, ROLE_CUSTOMER};

const SIGNUP_INCOMPLETE: &str =
    "Please fill in all the required information to sign up an accouont";

/// Fields accepted when creating an account.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub dob: String,
    pub role: String,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
}

/// Who may log in through a given endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginScope {
    Customer,
    Admin,
}

/// Role stored for a self-service signup.
///
/// Any non-empty requested role yields `admin`, so a caller can self-elevate
/// at signup. This is the long-standing behavior and is kept as-is.
pub fn signup_role(requested: &str) -> &'static str {
    if requested.is_empty() {
        ROLE_CUSTOMER
    } else {
        ROLE_ADMIN
    }
}

fn require_signup_fields(new_user: &NewUser) -> Result<(), AppError> {
    if new_user.username.is_empty() || new_user.password.is_empty() || new_user.dob.is_empty() {
        return Err(AppError::invalid(ErrorCode::ValidationError, SIGNUP_INCOMPLETE));
    }
    Ok(())
}

async fn insert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
    role: &str,
) -> Result<User, AppError> {
    let password_hash = hash_password(&new_user.password)?;
    let user = users::create(
        conn,
        User {
            username: new_user.username,
            password_hash,
            dob: new_user.dob,
            role: role.to_string(),
            chest: new_user.chest,
            waist: new_user.waist,
            hip: new_user.hip,
            ..Default::default()
        },
    )
    .await?;

    info!(user_id = user.id, role = %user.role, "user created");
    Ok(user)
}

pub async fn signup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
) -> Result<User, AppError> {
    require_signup_fields(&new_user)?;
    let role = signup_role(&new_user.role);
    if role == ROLE_ADMIN {
        warn!("signup requested a role; account will be created as admin");
    }
    insert_user(conn, new_user, role).await
}

/// Admin-initiated account creation; the role is always `customer`.
pub async fn create_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser,
) -> Result<User, AppError> {
    require_signup_fields(&new_user)?;
    insert_user(conn, new_user, ROLE_CUSTOMER).await
}

/// Check credentials and mint a session token.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    keys: &dyn TokenKeyProvider,
    username: &str,
    password: &str,
    scope: LoginScope,
    now: SystemTime,
) -> Result<(User, String), AppError> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "NOTE: Username or password cannot be empty",
        ));
    }

    let user = users::find_by_username(conn, username).await?.ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidCredentials,
            "NOTE: User does not exist. Please create a user account.",
        )
    })?;

    if scope == LoginScope::Admin && user.role != ROLE_ADMIN {
        warn!(user_id = user.id, "admin login attempted by non-admin");
        return Err(AppError::forbidden_with("You are not admin"));
    }

    if !verify_password(&user.password_hash, password) {
        info!(user_id = user.id, "login rejected: wrong password");
        return Err(AppError::bad_request(
            ErrorCode::InvalidCredentials,
            "NOTE: Incorrect Password. Please try again.",
        ));
    }

    let key = keys.signing_key().await.map_err(|e| match e {
        DomainError::NotFound(..) => AppError::not_found(
            ErrorCode::SigningKeyNotFound,
            "NOTE: Failed to get token key",
        ),
        other => AppError::from(other),
    })?;

    let token = issue_token(user.id, &user.username, Role::from_stored(&user.role), &key, now)?;
    info!(user_id = user.id, "user logged in");
    Ok((user, token))
}

pub async fn get_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, AppError> {
    users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "record not found"))
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<User>, AppError> {
    Ok(users::list_all(conn).await?)
}

pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, AppError> {
    let user = users::delete(conn, user_id).await?;
    info!(user_id, "user deleted");
    Ok(user)
}

/// Merge an edit into the stored user.
///
/// `incoming.password_hash` carries the plaintext password from the payload;
/// a non-empty value is hashed before the merge.
pub async fn edit_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mut incoming: User,
) -> Result<User, AppError> {
    if incoming.id == 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidId,
            "User request ID does not exist",
        ));
    }

    if !incoming.password_hash.is_empty() {
        incoming.password_hash = hash_password(&incoming.password_hash)?;
    }

    let user = merge_and_save(&SeaStore::new(conn), &incoming).await?;
    info!(user_id = user.id, "user updated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::signup_role;
    use crate::repos::users::{ROLE_ADMIN, ROLE_CUSTOMER};

    #[test]
    fn empty_role_signs_up_as_customer() {
        assert_eq!(signup_role(""), ROLE_CUSTOMER);
    }

    #[test]
    fn any_requested_role_signs_up_as_admin() {
        // Self-elevation at signup is current behavior.
        assert_eq!(signup_role("customer"), ROLE_ADMIN);
        assert_eq!(signup_role("admin"), ROLE_ADMIN);
        assert_eq!(signup_role("x"), ROLE_ADMIN);
    }
}
