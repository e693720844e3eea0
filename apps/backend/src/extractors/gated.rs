use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;

/// Auth extractor `A` resolved before request input `T` is read.
///
/// Actix polls a handler's extractors together, so a body or query error
/// could otherwise be reported ahead of a still-pending token check. Here
/// `T` is not touched until `A` has succeeded.
#[derive(Debug)]
pub struct Gated<A, T>(pub A, pub T);

impl<A, T> FromRequest for Gated<A, T>
where
    A: FromRequest<Error = AppError> + 'static,
    T: FromRequest<Error = AppError> + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let mut payload = payload.take();

        Box::pin(async move {
            let auth = A::from_request(&req, &mut Payload::None).await?;
            let input = T::from_request(&req, &mut payload).await?;
            Ok(Gated(auth, input))
        })
    }
}
