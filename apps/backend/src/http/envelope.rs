//! Uniform response envelope.
//!
//! Every endpoint answers `{status, message, details}` with HTTP 200, success
//! or failure alike. Callers inspect `status`. The envelope status is mirrored
//! into the `x-envelope-status` header so middleware can log outcomes without
//! buffering bodies.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

pub const ENVELOPE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-envelope-status");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvelopeStatus {
    Success,
    Fail,
}

impl EnvelopeStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Fail => "FAIL",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub message: String,
    pub details: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, details: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok()
            .insert_header((
                ENVELOPE_STATUS_HEADER,
                HeaderValue::from_static(self.status.as_str()),
            ))
            .json(self)
    }
}

impl Envelope<()> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Fail,
            message: message.into(),
            details: None,
        }
    }
}

/// Shorthand for a SUCCESS envelope response.
pub fn success<T: Serialize>(message: impl Into<String>, details: T) -> HttpResponse {
    Envelope::success(message, details).into_response()
}
