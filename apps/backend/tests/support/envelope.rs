use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use serde_json::Value;

/// Call the service and return the envelope body.
///
/// Every response is HTTP 200 regardless of outcome; that is asserted here
/// so individual tests only look at `status`.
pub async fn call_envelope<S, B>(app: &S, req: Request) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let header = resp
        .headers()
        .get("x-envelope-status")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(header.as_deref(), body["status"].as_str());
    body
}

pub fn assert_success(body: &Value) {
    assert_eq!(body["status"], "SUCCESS", "unexpected envelope: {body}");
}

pub fn assert_fail(body: &Value, message: &str) {
    assert_eq!(body["status"], "FAIL", "unexpected envelope: {body}");
    assert_eq!(body["message"], message);
    assert!(body["details"].is_null());
}
