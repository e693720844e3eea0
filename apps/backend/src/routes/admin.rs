use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{AdminUser, Gated, IdQuery, ValidatedJson};
use crate::http::success;
use crate::repos::users::User;
use crate::routes::users::{login_with_scope, LoginRequest, SignupRequest};
use crate::routes::views::{ListUsersView, UserView};
use crate::services::users::{self as user_service, LoginScope};
use crate::state::app_state::AppState;

/// Admin edit of a customer record, addressed by `id`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditCustomerRequest {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub dob: String,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
}

async fn admin_login(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    login_with_scope(&app_state, body.into_inner(), LoginScope::Admin).await
}

async fn create_customer(
    Gated(_admin, body): Gated<AdminUser, ValidatedJson<SignupRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::create_customer(&app_state.db, body.into_inner().into()).await?;
    Ok(success(
        format!("{} is inserted successfully", user.username),
        UserView::from(user),
    ))
}

async fn delete_customer(
    Gated(_admin, IdQuery(id)): Gated<AdminUser, IdQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::delete_user(&app_state.db, id).await?;
    Ok(success(
        format!("{} is deleted successfully", user.username),
        UserView::from(user),
    ))
}

async fn list_customers(
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = user_service::list_users(&app_state.db).await?;
    Ok(success(
        "SUCCESS",
        ListUsersView {
            users: users.into_iter().map(UserView::from).collect(),
        },
    ))
}

async fn get_customer_info(
    Gated(_admin, IdQuery(id)): Gated<AdminUser, IdQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(&app_state.db, id).await?;
    Ok(success("SUCCESS", UserView::from(user)))
}

async fn edit_customer(
    Gated(_admin, body): Gated<AdminUser, ValidatedJson<EditCustomerRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let incoming = User {
        id: req.id,
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
    cfg.route("/login", web::post().to(admin_login))
        .route("/create-customer", web::post().to(create_customer))
        .route("/delete-customer", web::delete().to(delete_customer))
        .route("/list-customers", web::get().to(list_customers))
        .route("/get-customer-info", web::get().to(get_customer_info))
        .route("/edit-customer", web::patch().to(edit_customer));
}
