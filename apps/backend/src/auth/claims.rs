//! Session token claims.

use serde::{Deserialize, Serialize};

/// Role carried in a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    /// Maps a stored role string onto a token role. Only `admin` is elevated.
    pub fn from_stored(role: &str) -> Self {
        if role == Role::Admin.as_str() {
            Role::Admin
        } else {
            Role::Customer
        }
    }
}

/// Claims embedded in every issued session token.
///
/// Immutable once issued; valid only while the signature matches the current
/// signing key and `now < exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user id
    pub id: i64,
    /// Username at issuance
    pub username: String,
    pub role: Role,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
