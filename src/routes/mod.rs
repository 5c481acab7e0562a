// Route exports
pub mod customers;
pub mod matches;

use actix_web::dev::Payload;
use actix_web::{error, http::header, web, FromRequest, HttpRequest, HttpResponse, Responder};
use std::future::{ready, Ready};
use std::sync::Arc;

use crate::core::{Matcher, ProfileLinks};
use crate::errors::AppError;
use crate::models::HealthResponse;
use crate::services::{AuthenticatedMatchmaker, CustomerStore, InsightGenerator, JwtVerifier, Mailer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
    pub insights: Arc<dyn InsightGenerator>,
    pub mailer: Arc<dyn Mailer>,
    pub auth: Arc<JwtVerifier>,
    pub matcher: Matcher,
    pub links: ProfileLinks,
}

impl FromRequest for AuthenticatedMatchmaker {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedMatchmaker, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state not configured".to_string()))?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    state.auth.verify_header(header).map_err(|e| {
        tracing::info!("Rejected request to {}: {}", req.path(), e);
        AppError::from(e)
    })
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    AppError::Validation(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Invalid query: {}", err)).into()
}

/// Handle malformed path parameters (e.g. a customer id that is not a UUID)
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::NotFound(format!("Invalid path: {}", err)).into()
}

/// Extractor configuration plus every route under `/api/v1`
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .configure(configure_routes);
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(customers::configure)
            .configure(matches::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.store.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
