use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Record id taken from the `?id=` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdQuery(pub i64);

fn parse_id(query_string: &str) -> Result<i64, AppError> {
    let params = web::Query::<HashMap<String, String>>::from_query(query_string)
        .map_err(|e| AppError::bad_request(ErrorCode::InvalidId, e.to_string()))?;

    let raw = params
        .get("id")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::bad_request(ErrorCode::InvalidId, "Url param key not exist"))?;

    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidId, format!("invalid id: {raw}"))
        })
}

impl FromRequest for IdQuery {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_id(req.query_string()).map(IdQuery))
    }
}

#[cfg(test)]
mod tests {
    use super::parse_id;
    use crate::errors::ErrorCode;

    #[test]
    fn parses_plain_id() {
        assert_eq!(parse_id("id=42").unwrap(), 42);
        assert_eq!(parse_id("x=1&id=7").unwrap(), 7);
    }

    #[test]
    fn missing_or_empty_id() {
        for q in ["", "id=", "other=3"] {
            let err = parse_id(q).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidId);
            assert_eq!(err.to_string(), "Url param key not exist");
        }
    }

    #[test]
    fn non_numeric_id() {
        for q in ["id=abc", "id=-1", "id=1.5"] {
            let err = parse_id(q).unwrap_err();
            assert!(err.to_string().starts_with("invalid id"), "{q}");
        }
    }
}
