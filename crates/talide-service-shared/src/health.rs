//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,
    pub service: String,
    pub version: String,

    /// Number of maps available for routing (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_loaded: Option<usize>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            maps_loaded: None,
        }
    }

    pub fn ready(service: &str, version: &str, maps: usize) -> Self {
        Self {
            maps_loaded: Some(maps),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe handler; always 200 while the process is serving.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"talide-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler; 503 until at least one map is loaded.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"talide-service-shared","version":"0.1.0","maps_loaded":3}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let maps = state.maps().len();
    if maps == 0 {
        let status = HealthStatus::not_ready(service, version, "no maps loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, maps);
    (StatusCode::OK, Json(status)).into_response()
}
