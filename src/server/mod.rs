//! HTTP backend serving the calculation endpoints.

pub mod error;
pub mod routes;

use crate::core::config::ServerConfig;
use crate::server::error::ApiError;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Immutable per-server settings shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct ServerState {
    pub decimal_places: u32,
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            warn!(error = %err, "Rejected request body");
            ApiError::InvalidBody(err.to_string()).into()
        })
}

fn cors_headers(allowed_origin: String) -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
}

pub fn build_app(
    state: ServerState,
    allowed_origin: String,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(cors_headers(allowed_origin))
        .configure(routes::configure)
}

/// Binds to the configured address and serves until shut down.
pub async fn run(config: &ServerConfig, decimal_places: u32) -> Result<()> {
    let state = ServerState { decimal_places };
    let allowed_origin = config.allowed_origin.clone();

    let server = HttpServer::new(move || build_app(state, allowed_origin.clone()))
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    info!(
        host = %config.host,
        port = config.port,
        allowed_origin = %config.allowed_origin,
        "Serving calculations"
    );
    server.run().await.context("HTTP server stopped unexpectedly")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;

    #[actix_web::test]
    async fn app_factory_owns_its_origin() {
        let allowed_origin = "https://calc.example".to_string();
        let state = ServerState { decimal_places: 0 };
        let factory = move || build_app(state, allowed_origin.clone());

        for _ in 0..2 {
            let app = actix_test::init_service(factory()).await;
            let request = actix_test::TestRequest::get().uri("/health").to_request();
            let response = actix_test::call_service(&app, request).await;
            assert!(response.status().is_success());
            assert_eq!(
                response
                    .headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .unwrap(),
                "https://calc.example"
            );
        }
    }
}
