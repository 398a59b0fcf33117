use crate::core::{CalculationMode, MODES, RawRequest, calculate_raw};
use crate::server::ServerState;
use crate::server::error::ApiError;
use actix_web::http::Method;
use actix_web::{HttpResponse, web};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

/// Registers one resource per mode table entry plus `/calculate` and `/health`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for spec in MODES {
        cfg.service(
            web::resource(spec.endpoint)
                .app_data(web::Data::new(spec.mode))
                .route(web::post().to(calculate_mode))
                .route(web::method(Method::OPTIONS).to(preflight)),
        );
    }
    cfg.service(
        web::resource("/calculate")
            .route(web::post().to(calculate_any))
            .route(web::method(Method::OPTIONS).to(preflight)),
    );
    cfg.service(web::resource("/health").route(web::get().to(health)));
}

async fn calculate_mode(
    mode: web::Data<CalculationMode>,
    state: web::Data<ServerState>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    respond(**mode, &state, &body)
}

async fn calculate_any(
    state: web::Data<ServerState>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let mode = match body.get("mode") {
        None | Some(Value::Null) => return Err(ApiError::MissingMode),
        Some(Value::String(name)) => name
            .parse::<CalculationMode>()
            .map_err(|_| ApiError::UnknownMode(name.clone()))?,
        Some(other) => return Err(ApiError::UnknownMode(other.to_string())),
    };
    respond(mode, &state, &body)
}

fn respond(
    mode: CalculationMode,
    state: &ServerState,
    fields: &Map<String, Value>,
) -> Result<HttpResponse, ApiError> {
    let result = RawRequest::from_json_fields(fields, &mode.spec().amount_keys())
        .and_then(|raw| calculate_raw(mode, &raw))
        .inspect_err(|e| warn!(%mode, field = e.field(), error = %e, "Rejected calculation"))?;

    info!(%mode, "Calculated");
    Ok(HttpResponse::Ok().json(result.rounded(state.decimal_places)))
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}
