//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub resolver: ResolverStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverStatus {
    pub healthy: bool,
    /// Dataset requests are answered from
    pub dataset: String,
}

/// Readiness check - can requests be answered right now?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let healthy = state.sighting_service.is_resolver_healthy().await;
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: healthy,
            resolver: ResolverStatus {
                healthy,
                dataset: state.config.database_filepath.clone(),
            },
        }),
    )
}
