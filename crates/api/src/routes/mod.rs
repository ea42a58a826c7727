//! API routes

pub mod health;
pub mod host;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{routing::resolve_host_middleware, state::AppState};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    // Host-routed API routes - under /api/v1
    let api_routes = Router::new()
        .route("/host", get(host::current_host))
        .route("/tenant", get(host::current_tenant))
        .route("/product", get(host::current_product))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_host_middleware,
        ));

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
