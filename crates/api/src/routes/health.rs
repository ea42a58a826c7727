//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub base_domains: usize,
    pub trust_proxy: bool,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ready = is_ready(&state);

    (
        if ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        },
        Json(HealthResponse {
            status: (if ready { "healthy" } else { "unhealthy" }).to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            base_domains: state.routing.base_domains().len(),
            trust_proxy: state.proxy.trust_proxy,
        }),
    )
}

/// Liveness check (just returns 200 if the server is running)
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness check
///
/// Static check with no dependencies to reach: the state must route at least
/// one base domain. `Config::from_env` already refuses an empty list, so this
/// only reports 503 for states assembled by hand.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if is_ready(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

fn is_ready(state: &AppState) -> bool {
    !state.routing.base_domains().is_empty()
}
