use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::errors::ErrorCode;
use crate::http::Envelope;
use crate::infra::db_errors::map_db_err;

/// Handler-facing error.
///
/// Every variant renders as a FAIL envelope with HTTP 200; the transport never
/// distinguishes 401/403/404/500-style conditions.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{detail}")]
    MissingToken { detail: &'static str },
    #[error("{detail}")]
    InvalidToken { detail: String },
    #[error("{detail}")]
    Forbidden { detail: &'static str },
    #[error("{detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("{detail}")]
    Store { detail: String },
    #[error("{detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("{detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("{detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("{detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::MissingToken { .. } => ErrorCode::MissingToken,
            AppError::InvalidToken { .. } => ErrorCode::InvalidToken,
            AppError::Forbidden { .. } => ErrorCode::Forbidden,
            AppError::NotFound { code, .. } => *code,
            AppError::Store { .. } => ErrorCode::StoreError,
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn missing_token(detail: &'static str) -> Self {
        Self::MissingToken { detail }
    }

    pub fn invalid_token(detail: impl Into<String>) -> Self {
        Self::InvalidToken {
            detail: detail.into(),
        }
    }

    pub fn forbidden() -> Self {
        Self::Forbidden {
            detail: "NOTE: Only admin is allowed for this operation",
        }
    }

    pub fn forbidden_with(detail: &'static str) -> Self {
        Self::Forbidden { detail }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn store(detail: impl Into<String>) -> Self {
        Self::Store {
            detail: detail.into(),
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn is_server_side(&self) -> bool {
        matches!(
            self,
            AppError::Store { .. } | AppError::Internal { .. } | AppError::Config { .. }
        )
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(detail) => AppError::invalid(ErrorCode::ValidationError, detail),
            DomainError::Conflict(ConflictKind::UniqueUsername, detail) => {
                AppError::conflict(ErrorCode::UsernameTaken, detail)
            }
            DomainError::Conflict(_, detail) => AppError::conflict(ErrorCode::Conflict, detail),
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::User => ErrorCode::UserNotFound,
                    NotFoundKind::Product => ErrorCode::ProductNotFound,
                    NotFoundKind::Order => ErrorCode::OrderNotFound,
                    NotFoundKind::Credential => ErrorCode::SigningKeyNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(_, detail) => AppError::store(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(map_db_err(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.code();
        let message = self.to_string();

        if self.is_server_side() {
            error!(code = %code, message = %message, "request failed");
        } else {
            warn!(code = %code, message = %message, "request rejected");
        }

        Envelope::fail(message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    use super::AppError;
    use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
    use crate::errors::ErrorCode;

    #[actix_web::test]
    async fn every_error_renders_fail_envelope_with_ok_status() {
        let errors = vec![
            AppError::missing_token("no request token"),
            AppError::invalid_token("invalid token"),
            AppError::forbidden(),
            AppError::store("connection refused"),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::OK);
            let resp = err.error_response();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                resp.headers().get("x-envelope-status").unwrap(),
                "FAIL"
            );
            let body = to_bytes(resp.into_body()).await.unwrap();
            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["status"], "FAIL");
            assert_eq!(value["message"], err.to_string());
            assert!(value["details"].is_null());
        }
    }

    #[test]
    fn forbidden_message_matches_admin_only_note() {
        assert_eq!(
            AppError::forbidden().to_string(),
            "NOTE: Only admin is allowed for this operation"
        );
    }

    #[test]
    fn domain_errors_map_to_codes() {
        let cases = vec![
            (
                DomainError::not_found(NotFoundKind::Product, "record not found"),
                ErrorCode::ProductNotFound,
            ),
            (
                DomainError::not_found(NotFoundKind::Credential, "record not found"),
                ErrorCode::SigningKeyNotFound,
            ),
            (
                DomainError::conflict(ConflictKind::UniqueUsername, "taken"),
                ErrorCode::UsernameTaken,
            ),
            (
                DomainError::infra(InfraErrorKind::DbUnavailable, "down"),
                ErrorCode::StoreError,
            ),
            (DomainError::validation("bad"), ErrorCode::ValidationError),
        ];

        for (domain, expected) in cases {
            assert_eq!(AppError::from(domain).code(), expected);
        }
    }
}
