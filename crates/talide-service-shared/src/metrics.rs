//! Prometheus metrics for Talide services.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for `/metrics` endpoint
//! - Business metric helpers for the route service
//!
//! # Example
//!
//! ```no_run
//! use talide_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//! use axum::{routing::get, Router};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use talide_lib::Error as LibError;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED`: anything but "false" (case-insensitive) enables metrics.
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        Self { enabled }
    }
}

/// Install the global Prometheus recorder.
///
/// # Errors
///
/// - [`MetricsError::Disabled`] when the configuration turns metrics off
/// - [`MetricsError::AlreadyInitialized`] on a second call
/// - [`MetricsError::InstallFailed`] when the recorder cannot be installed
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for the `/metrics` endpoint (Prometheus exposition format).
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increment `talide_routes_calculated_total`.
pub fn record_route_calculated(endpoint: &str) {
    metrics::counter!(
        "talide_routes_calculated_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Increment `talide_routes_failed_total` with a low-cardinality `reason`
/// label (see [`failure_reason`]).
pub fn record_route_failed(reason: &'static str, endpoint: &str) {
    metrics::counter!(
        "talide_routes_failed_total",
        "reason" => reason,
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Record the hop count of a computed route to `talide_route_hops`.
pub fn record_route_hops(hops: usize) {
    metrics::histogram!("talide_route_hops").record(hops as f64);
}

/// Metric label for a failed routing call.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownNode { .. } => "unknown_node",
        LibError::RouteNotFound { .. } => "no_path",
        LibError::SearchBudgetExceeded { .. } => "search_budget",
        LibError::UnknownVertex { .. } | LibError::InvalidMap { .. } | LibError::Json(_) => {
            "invalid_map"
        }
        _ => "internal_error",
    }
}
