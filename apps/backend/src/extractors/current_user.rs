use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::claims::Claims;
use crate::auth::gate::RequiredRole;
use crate::error::AppError;
use crate::state::app_state::AppState;

async fn claims_for(req: HttpRequest, required: RequiredRole) -> Result<Claims, AppError> {
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    app_state.gate().authenticate(&req, required).await
}

/// Verified claims of any authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl Deref for CurrentUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { claims_for(req, RequiredRole::Any).await.map(CurrentUser) })
    }
}

/// Verified claims of a caller holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl Deref for AdminUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { claims_for(req, RequiredRole::Admin).await.map(AdminUser) })
    }
}
