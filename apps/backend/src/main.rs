use actix_web::{web, App, HttpServer};
use storefront::config::db::database_url;
use storefront::config::server::ServerConfig;
use storefront::infra::state::build_state;
use storefront::middleware::cors::cors_middleware;
use storefront::middleware::structured_logger::StructuredLogger;
use storefront::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let server = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let url = match database_url() {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "invalid database configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_database_url(url).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);
    let origins = server.cors_allowed_origins.clone();
    let (host, port) = server.bind_addr();

    info!(%host, port, "starting storefront backend");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
