use actix_web::web;

pub mod admin;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;
pub mod views;

/// Register every route. Shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes))
        .service(web::scope("/user").configure(users::configure_routes))
        .service(web::scope("/admin").configure(admin::configure_routes))
        .service(web::scope("/product").configure(products::configure_routes))
        .service(web::scope("/order").configure(orders::configure_routes));
}
