use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{CurrentUser, Gated, ValidatedJson};
use crate::http::success;
use crate::repos::users::User;
use crate::routes::views::UserView;
use crate::services::users::{self as user_service, LoginScope, NewUser};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub dob: String,
    pub role: String,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
}

impl From<SignupRequest> for NewUser {
    fn from(req: SignupRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            dob: req.dob,
            role: req.role,
            chest: req.chest,
            waist: req.waist,
            hip: req.hip,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Self-service profile edit. Zero or empty fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditPersonalInfoRequest {
    pub username: String,
    pub password: String,
    pub dob: String,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
}

async fn signup(
    app_state: web::Data<AppState>,
    body: ValidatedJson<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::signup(&app_state.db, body.into_inner().into()).await?;
    Ok(success(
        format!("{} is inserted successfully", user.username),
        UserView::from(user),
    ))
}

pub(crate) async fn login_with_scope(
    app_state: &AppState,
    req: LoginRequest,
    scope: LoginScope,
) -> Result<HttpResponse, AppError> {
    let (user, token) = user_service::login(
        &app_state.db,
        app_state.keys.as_ref(),
        &req.username,
        &req.password,
        scope,
        SystemTime::now(),
    )
    .await?;

    Ok(success(
        format!("{} logged in successfully", user.username),
        token,
    ))
}

async fn login(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    login_with_scope(&app_state, body.into_inner(), LoginScope::Customer).await
}

async fn personal_info(
    current: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(&app_state.db, current.id).await?;
    Ok(success("", UserView::from(user)))
}

async fn edit_personal_info(
    Gated(current, body): Gated<CurrentUser, ValidatedJson<EditPersonalInfoRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let incoming = User {
        id: current.id,
        username: req.username,
        password_hash: req.password,
        dob: req.dob,
        chest: req.chest,
        waist: req.waist,
        hip: req.hip,
        ..Default::default()
    };

    let user = user_service::edit_user(&app_state.db, incoming).await?;
    Ok(success(
        format!("{} is updated successfully", user.username),
        UserView::from(user),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup))
        .route("/login", web::post().to(login))
        .route("/personal-info", web::get().to(personal_info))
        .route("/edit-personal-info", web::patch().to(edit_personal_info));
}
