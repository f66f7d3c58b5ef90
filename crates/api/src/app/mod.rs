//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the session sweeper
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use pizzeria_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Also starts the background session sweeper on the current runtime.
pub async fn build_app(config: &AppConfig) -> Result<Router, services::BuildError> {
    let services = Arc::new(services::build_services(config).await?);
    services::spawn_session_sweeper(services.sessions.clone(), config.sweep_interval);
    Ok(router(services))
}

/// Router over already-built services.
pub fn router(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/v1", routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_log)))
}

pub use services::AppServices;
