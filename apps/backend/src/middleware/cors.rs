use actix_cors::Cors;
use actix_web::http::header;

use crate::http::ENVELOPE_STATUS_HEADER;

/// Build CORS middleware from the configured origin list.
///
/// An empty list allows any origin. Otherwise only the listed origins are
/// accepted. Methods are limited to those the API routes use.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![ENVELOPE_STATUS_HEADER])
        .max_age(3600);

    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
