use std::time::SystemTime;

use actix_web::http::header;
use storefront::auth::jwt::issue_token;
use storefront::auth::keys::SigningKey;
use storefront::auth::password::hash_password;
use storefront::repos::users::{self, User};
use storefront::{AppState, Role};

use super::test_state::TEST_SECRET;

/// Token signed with the provisioned test key.
pub fn token_for(id: i64, username: &str, role: Role) -> String {
    issue_token(
        id,
        username,
        role,
        &SigningKey::new(TEST_SECRET),
        SystemTime::now(),
    )
    .expect("token should encode")
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Insert a user directly, bypassing the signup role rule.
pub async fn seed_user(state: &AppState, username: &str, password: &str, role: &str) -> User {
    users::create(
        &state.db,
        User {
            username: username.to_string(),
            password_hash: hash_password(password).expect("hash"),
            dob: "1990-01-01".to_string(),
            role: role.to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("seed user")
}
