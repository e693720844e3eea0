pub mod claims;
pub mod gate;
pub mod jwt;
pub mod keys;
pub mod password;

pub use claims::{Claims, Role};
pub use gate::{AuthGate, BearerSource, RequiredRole};
pub use jwt::{issue_token, verify_token, TOKEN_TTL_SECS};
pub use keys::{CredentialKeyProvider, SigningKey, StaticKeyProvider, TokenKeyProvider};
