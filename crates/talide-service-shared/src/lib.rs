//! Shared infrastructure for Talide HTTP services.
//!
//! This crate provides the HTTP glue around `talide-lib`:
//!
//! - [`AppState`] and [`MapStore`]: maps loaded once at startup, shared read-only
//! - [`ServiceConfig`]: environment-driven service configuration
//! - [`health_live`] / [`health_ready`]: liveness and readiness handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request ID propagation and HTTP tracing
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; all routing logic lives in `talide-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query / JSON body                                  │
//! │  - Validate parameters                                      │
//! │  - Resolve the map and call talide-lib                      │
//! │  - Format response or problem                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixture-backed state for handler tests.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;
mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    failure_reason, init_metrics, metrics_handler, record_route_calculated, record_route_failed,
    record_route_hops, MetricsConfig, MetricsError,
};
pub use middleware::{
    extract_or_generate_request_id, http_trace_layer, propagate_request_id, RequestId,
    RequestSpan, REQUEST_ID_HEADER,
};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_MAP_NOT_FOUND, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SEARCH_BUDGET_EXCEEDED,
    PROBLEM_UNKNOWN_NODE,
};
pub use request::{GraphQuery, MapSource, RouteRequest, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
pub use store::{MapStore, MapSummary};
