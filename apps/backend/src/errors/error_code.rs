//! Error codes for the storefront API.
//!
//! All error codes are SCREAMING_SNAKE_CASE. They never change the HTTP status
//! (failures are answered with a FAIL envelope) but they are logged with every
//! failure so operators can tell a missing token from a store outage.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer token
    MissingToken,
    /// Malformed, forged or expired token
    InvalidToken,
    /// Valid token, insufficient role
    Forbidden,
    /// Username or password did not match
    InvalidCredentials,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Required `id` query parameter missing or unparsable
    InvalidId,

    // Resource Not Found
    UserNotFound,
    ProductNotFound,
    OrderNotFound,
    /// Signing key credential row missing
    SigningKeyNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    UsernameTaken,
    /// General conflict error
    Conflict,

    // System Errors
    /// Persistence unreachable or failed
    StoreError,
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::SigningKeyNotFound => "SIGNING_KEY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::Conflict => "CONFLICT",
            Self::StoreError => "STORE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
