//! Health check endpoints for liveness/readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys_loaded: Option<usize>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        keys_loaded: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check - reports degraded when the registry loaded no keys
/// (every non-master request will be rejected until the key file is fixed).
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let keys = state.key_store.key_count();
    let status = if keys > 0 {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        keys_loaded: Some(keys),
    };

    // Degraded still accepts traffic; the proxy-fetch path needs no keys.
    (StatusCode::OK, Json(response))
}

/// Liveness check for crash detection
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
