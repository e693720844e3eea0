//! Bearer-token authentication and role gating.

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use tracing::{debug, warn};

use crate::auth::claims::Claims;
use crate::auth::jwt::verify_token;
use crate::auth::keys::TokenKeyProvider;
use crate::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Role a protected operation demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any holder of a valid token.
    Any,
    Admin,
}

/// Anything that can hand over a raw `Authorization` header value.
pub trait BearerSource {
    fn authorization(&self) -> Option<&str>;
}

impl BearerSource for HttpRequest {
    fn authorization(&self) -> Option<&str> {
        // A non-UTF8 header is treated as absent.
        self.headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl BearerSource for Option<&str> {
    fn authorization(&self) -> Option<&str> {
        *self
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// Headers of seven bytes or fewer are rejected even when they read
/// `"Bearer "`, so an empty token never reaches the codec.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AppError::missing_token("no request token")),
    };

    if header.len() <= BEARER_PREFIX.len() {
        return Err(AppError::missing_token("could not get token string"));
    }

    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::missing_token("could not get token string"))
}

/// Verifies bearer tokens against the current signing key and enforces roles.
#[derive(Clone)]
pub struct AuthGate {
    keys: Arc<dyn TokenKeyProvider>,
}

impl AuthGate {
    pub fn new(keys: Arc<dyn TokenKeyProvider>) -> Self {
        Self { keys }
    }

    pub async fn authenticate<S>(&self, source: &S, required: RequiredRole) -> Result<Claims, AppError>
    where
        S: BearerSource + ?Sized,
    {
        self.authenticate_at(source, required, SystemTime::now())
            .await
    }

    /// Same as [`AuthGate::authenticate`] with an explicit clock.
    pub async fn authenticate_at<S>(
        &self,
        source: &S,
        required: RequiredRole,
        now: SystemTime,
    ) -> Result<Claims, AppError>
    where
        S: BearerSource + ?Sized,
    {
        let token = bearer_token(source.authorization())?;
        let key = self.keys.signing_key().await?;
        let claims = verify_token(token, &key, now)?;

        if required == RequiredRole::Admin && !claims.is_admin() {
            warn!(user_id = claims.id, "admin operation attempted without admin role");
            return Err(AppError::forbidden());
        }

        debug!(user_id = claims.id, role = claims.role.as_str(), "request authenticated");
        Ok(claims)
    }
}
