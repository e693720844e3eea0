//! Session token codec: HS256 JWTs carrying [`Claims`].
//!
//! Both operations take `now` so expiry can be exercised without sleeping.
//! Expiry is enforced here rather than by `jsonwebtoken` because the library
//! reads the wall clock and applies leeway; tokens are rejected once
//! `now >= exp`.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::auth::claims::{Claims, Role};
use crate::auth::keys::SigningKey;
use crate::AppError;

/// Token lifetime: 3000 minutes.
pub const TOKEN_TTL_SECS: i64 = 3000 * 60;

const INVALID_TOKEN: &str = "invalid token";

fn unix_secs(now: SystemTime) -> Result<i64, AppError> {
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AppError::internal("Failed to get current time"))
}

/// Mint a token for `id`/`username`/`role` expiring [`TOKEN_TTL_SECS`] after `now`.
pub fn issue_token(
    id: i64,
    username: &str,
    role: Role,
    key: &SigningKey,
    now: SystemTime,
) -> Result<String, AppError> {
    let claims = Claims {
        id,
        username: username.to_string(),
        role,
        exp: unix_secs(now)? + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .map_err(|e| {
        debug!(error = %e, "token encoding failed");
        AppError::internal("NOTE: Failed to create token")
    })
}

/// Verify a token and return its claims.
///
/// Malformed input, a signature mismatch and expiry all surface as the same
/// `AppError::InvalidToken`.
pub fn verify_token(token: &str, key: &SigningKey, now: SystemTime) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(key.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(reason = ?e.kind(), "token rejected");
            AppError::invalid_token(INVALID_TOKEN)
        })?;

    if unix_secs(now)? >= claims.exp {
        debug!(user_id = claims.id, "token expired");
        return Err(AppError::invalid_token(INVALID_TOKEN));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use proptest::prelude::*;

    use super::{issue_token, verify_token, TOKEN_TTL_SECS};
    use crate::auth::claims::Role;
    use crate::auth::keys::SigningKey;
    use crate::AppError;

    fn key() -> SigningKey {
        SigningKey::new("test_secret_key_for_testing_purposes_only")
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let now = SystemTime::now();
        let token = issue_token(7, "alice", Role::Customer, &key(), now).unwrap();
        let claims = verify_token(&token, &key(), now).unwrap();

        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(
            claims.exp,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64 + TOKEN_TTL_SECS
        );
    }

    #[test]
    fn token_expires_exactly_at_exp() {
        let issued = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let token = issue_token(1, "bob", Role::Admin, &key(), issued).unwrap();
        let ttl = Duration::from_secs(TOKEN_TTL_SECS as u64);

        assert!(verify_token(&token, &key(), issued + ttl - Duration::from_secs(1)).is_ok());
        assert!(matches!(
            verify_token(&token, &key(), issued + ttl),
            Err(AppError::InvalidToken { .. })
        ));
        assert!(matches!(
            verify_token(&token, &key(), issued + ttl + Duration::from_secs(60)),
            Err(AppError::InvalidToken { .. })
        ));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let now = SystemTime::now();
        let token = issue_token(1, "bob", Role::Admin, &SigningKey::new("secret-A"), now).unwrap();
        let result = verify_token(&token, &SigningKey::new("secret-B"), now);
        assert!(matches!(result, Err(AppError::InvalidToken { .. })));
    }

    #[test]
    fn swapped_payload_is_rejected() {
        let now = SystemTime::now();
        let customer = issue_token(7, "alice", Role::Customer, &key(), now).unwrap();
        let admin = issue_token(7, "alice", Role::Admin, &key(), now).unwrap();

        let c: Vec<&str> = customer.split('.').collect();
        let a: Vec<&str> = admin.split('.').collect();
        let forged = format!("{}.{}.{}", c[0], a[1], c[2]);

        assert!(matches!(
            verify_token(&forged, &key(), now),
            Err(AppError::InvalidToken { .. })
        ));
    }

    #[test]
    fn altered_header_payload_or_signature_is_rejected() {
        let now = SystemTime::now();
        let token = issue_token(7, "alice", Role::Customer, &key(), now).unwrap();
        let first_dot = token.find('.').unwrap();
        let second_dot = token.rfind('.').unwrap();

        for i in [0, first_dot - 1, first_dot + 1, second_dot - 1, second_dot + 1, token.len() - 1] {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert!(
                matches!(verify_token(&tampered, &key(), now), Err(AppError::InvalidToken { .. })),
                "byte {i} altered"
            );
        }
    }

    #[test]
    fn garbage_is_rejected() {
        for token in ["", "abc", "a.b.c", "Bearer x.y.z"] {
            let result = verify_token(token, &key(), SystemTime::now());
            assert!(matches!(result, Err(AppError::InvalidToken { .. })), "{token}");
        }
    }

    proptest! {
        #[test]
        fn any_altered_char_is_rejected(idx in any::<prop::sample::Index>(), id in 1i64..10_000) {
            let now = SystemTime::now();
            let token = issue_token(id, "carol", Role::Customer, &key(), now).unwrap();
            let positions: Vec<usize> = token
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b != b'.')
                .map(|(i, _)| i)
                .collect();
            let i = *idx.get(&positions);
            let mut bytes = token.into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            let rejected = matches!(
                verify_token(&tampered, &key(), now),
                Err(AppError::InvalidToken { .. })
            );
            prop_assert!(rejected);
        }

        #[test]
        fn claims_survive_roundtrip(id in any::<i64>(), username in "[a-z]{1,16}", admin in any::<bool>()) {
            let role = if admin { Role::Admin } else { Role::Customer };
            let now = SystemTime::now();
            let token = issue_token(id, &username, role, &key(), now).unwrap();
            let claims = verify_token(&token, &key(), now).unwrap();
            prop_assert_eq!(claims.id, id);
            prop_assert_eq!(claims.username, username);
            prop_assert_eq!(claims.role, role);
        }
    }
}
