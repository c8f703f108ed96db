//! Talide delivery routing HTTP service.
//!
//! Computes the shortest route across a stored or inline map for a delivery
//! vehicle, returning the node sequence and the direction taken at each hop.
//!
//! # Endpoints
//!
//! - `GET /api/graph?mapid=&start=&target=&orientation=&orderid=` - Route over a stored map
//! - `POST /api/v1/route` - Route over a stored (`map_id`) or inline (`map`) map
//! - `GET /api/maps` - List the loaded maps
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `TALIDE_MAPS_DIR` - Directory of `*.json` maps (default: /data/maps)
//! - `TALIDE_MAX_DEPTH`, `TALIDE_MAX_PATHS`, `TALIDE_MAX_EXPANSIONS` - Search limits (0 = unbounded)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED` - Set to `false` to disable the Prometheus recorder

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use talide_lib::{
    Error as LibError, RouteResult, choose_route, compute_route_candidates,
    route_candidates_on_graph,
};
use talide_service_shared::{
    AppState, GraphQuery, LoggingConfig, MapSource, MapSummary, MetricsConfig, ProblemDetails,
    RouteRequest, ServiceConfig, ServiceResponse, Validate, extract_or_generate_request_id,
    failure_reason, from_lib_error, health_live, health_ready, http_trace_layer, init_logging,
    init_metrics, metrics_handler, propagate_request_id, record_route_calculated,
    record_route_failed, record_route_hops,
};

/// Successful routing payload.
#[derive(Debug, Serialize)]
struct RouteResponse {
    /// Chosen path with its directions and the echoed request identifiers.
    shortest_path: RouteResult,
    hops: usize,
    /// Number of equally short routes the path was chosen from.
    alternatives: usize,
    /// `true` when start and target are the same node.
    arrived: bool,
}

impl From<RouteResult> for RouteResponse {
    fn from(route: RouteResult) -> Self {
        Self {
            hops: route.hop_count(),
            alternatives: route.alternatives,
            arrived: route.arrived(),
            shortest_path: route,
        }
    }
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Success(ServiceResponse<RouteResponse>),
    Error(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env()?;
    info!(
        maps_dir = %config.maps_dir.display(),
        port = config.port,
        limits = ?config.limits,
        "starting route service"
    );

    let state = AppState::load(&config.maps_dir, config.limits).map_err(|e| {
        error!(error = %e, path = %config.maps_dir.display(), "failed to load application state");
        e
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, maps = state.maps().len(), "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Build the service router.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/graph", get(graph_handler))
        .route("/api/v1/route", post(route_handler))
        .route("/api/maps", get(maps_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(http_trace_layer())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(propagate_request_id))
        .with_state(state)
}

/// Handle GET /api/graph requests (legacy query interface).
async fn graph_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            record_route_failed("validation_error", "graph");
            return Response::Error(ProblemDetails::bad_request(rejection.body_text(), request_id));
        }
    };
    if let Err(problem) = query.validate(&request_id) {
        record_route_failed("validation_error", "graph");
        return Response::Error(*problem);
    }

    plan(&state, &RouteRequest::from(query), &request_id, "graph")
}

/// Handle POST /api/v1/route requests.
async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            record_route_failed("validation_error", "route");
            return Response::Error(ProblemDetails::bad_request(rejection.body_text(), request_id));
        }
    };
    if let Err(problem) = request.validate(&request_id) {
        record_route_failed("validation_error", "route");
        return Response::Error(*problem);
    }

    plan(&state, &request, &request_id, "route")
}

/// Handle GET /api/maps requests.
async fn maps_handler(State(state): State<AppState>) -> Json<Vec<MapSummary>> {
    Json(state.maps().summaries())
}

/// Resolve the map, run the routing pipeline and shape the response.
fn plan(state: &AppState, request: &RouteRequest, request_id: &str, endpoint: &str) -> Response {
    info!(
        request_id = %request_id,
        endpoint,
        map_id = request.map_id.as_deref().unwrap_or("<inline>"),
        start = %request.start,
        target = %request.target,
        orientation = %request.orientation,
        "handling route request"
    );

    let lib_request = request.to_lib_request(state.limits());
    let candidates = match request.map_source() {
        Some(MapSource::Stored(map_id)) => match state.maps().get(map_id) {
            Some(graph) => route_candidates_on_graph(graph, &lib_request),
            None => {
                warn!(request_id = %request_id, map_id, "map not found");
                record_route_failed("map_not_found", endpoint);
                return Response::Error(ProblemDetails::map_not_found(map_id, request_id));
            }
        },
        Some(MapSource::Inline(map)) => compute_route_candidates(map, &lib_request),
        None => {
            record_route_failed("validation_error", endpoint);
            return Response::Error(ProblemDetails::bad_request(
                "One of 'map_id' or 'map' is required",
                request_id,
            ));
        }
    };

    match candidates.and_then(|candidates| choose_route(&candidates, &lib_request)) {
        Ok(route) => {
            record_route_calculated(endpoint);
            record_route_hops(route.hop_count());
            info!(
                request_id = %request_id,
                hops = route.hop_count(),
                alternatives = route.alternatives,
                "route computed successfully"
            );
            Response::Success(ServiceResponse::new(RouteResponse::from(route)))
        }
        Err(e) => {
            log_failure(&e, request_id);
            record_route_failed(failure_reason(&e), endpoint);
            Response::Error(from_lib_error(&e, request_id))
        }
    }
}

fn log_failure(error: &LibError, request_id: &str) {
    match error {
        LibError::Io(_) | LibError::EmptyRoute => {
            error!(request_id = %request_id, error = %error, "route planning failed");
        }
        _ => warn!(request_id = %request_id, error = %error, "route not served"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use talide_lib::SearchLimits;
    use talide_service_shared::test_utils::{fixture_map, test_state, test_state_with_limits};

    fn server() -> TestServer {
        TestServer::new(app(test_state())).expect("test server starts")
    }

    async fn graph(server: &TestServer, params: &[(&str, &str)]) -> axum_test::TestResponse {
        let mut request = server.get("/api/graph");
        for (key, value) in params {
            request = request.add_query_param(key, value);
        }
        request.await
    }

    fn route_params<'a>(mapid: &'a str, start: &'a str, target: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![
            ("mapid", mapid),
            ("start", start),
            ("target", target),
            ("orientation", "north"),
        ]
    }

    #[tokio::test]
    async fn graph_returns_first_shortest_path() {
        let response = graph(&server(), &route_params("diamond", "A", "D")).await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["shortest_path"]["path"], json!(["A", "B", "D"]));
        assert_eq!(body["shortest_path"]["directions"], json!(["north", "east"]));
        assert_eq!(body["shortest_path"]["orientation"], "north");
        assert_eq!(body["shortest_path"]["mapid"], "diamond");
        assert_eq!(body["shortest_path"]["orderid"], Value::Null);
        assert_eq!(body["hops"], 2);
        assert_eq!(body["alternatives"], 2);
        assert_eq!(body["arrived"], false);
        assert_eq!(body["content_type"], "application/json");
    }

    #[tokio::test]
    async fn graph_echoes_order_id() {
        let mut params = route_params("warehouse", "0-0", "2-2");
        params.push(("orderid", "order-17"));
        let response = graph(&server(), &params).await;

        let body: Value = response.json();
        assert_eq!(body["shortest_path"]["orderid"], "order-17");
        assert_eq!(
            body["shortest_path"]["path"],
            json!(["0-0", "0-1", "0-2", "1-2", "2-2"])
        );
        assert_eq!(body["alternatives"], 6);
    }

    #[tokio::test]
    async fn graph_missing_parameter_is_bad_request() {
        let response = graph(&server(), &[("mapid", "diamond"), ("start", "A")]).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let content_type = response.headers().get("content-type").cloned();
        assert_eq!(
            content_type,
            Some(HeaderValue::from_static("application/problem+json"))
        );
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/invalid-request");
    }

    #[tokio::test]
    async fn unknown_map_is_not_found() {
        let response = graph(&server(), &route_params("floor-9", "A", "D")).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/map-not-found");
    }

    #[tokio::test]
    async fn unreachable_target_is_route_not_found() {
        let response = graph(&server(), &route_params("cycle", "A", "Island")).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/route-not-found");
    }

    #[tokio::test]
    async fn unknown_node_is_distinct_problem() {
        let response = graph(&server(), &route_params("warehouse", "0-9", "2-2")).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/unknown-node");
        assert!(body["detail"].as_str().unwrap().contains("0-9"));
    }

    #[tokio::test]
    async fn same_start_and_target_has_arrived() {
        let response = graph(&server(), &route_params("cycle", "Island", "Island")).await;
        let body: Value = response.json();
        assert_eq!(body["shortest_path"]["path"], json!(["Island"]));
        assert_eq!(body["hops"], 0);
        assert_eq!(body["arrived"], true);
    }

    #[tokio::test]
    async fn post_routes_over_inline_map() {
        let response = server()
            .post("/api/v1/route")
            .json(&json!({
                "map": fixture_map("diamond"),
                "start": "A",
                "target": "D",
                "orientation": "west",
                "order_id": "o-3"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["shortest_path"]["path"], json!(["A", "B", "D"]));
        assert_eq!(body["shortest_path"]["orientation"], "west");
        assert_eq!(body["shortest_path"]["mapid"], Value::Null);
        assert_eq!(body["shortest_path"]["orderid"], "o-3");
    }

    #[tokio::test]
    async fn post_routes_over_stored_map() {
        let response = server()
            .post("/api/v1/route")
            .json(&json!({
                "map_id": "cycle",
                "start": "A",
                "target": "C",
                "orientation": "north"
            }))
            .await;
        let body: Value = response.json();
        assert_eq!(body["shortest_path"]["path"], json!(["A", "B", "C"]));
        assert_eq!(body["shortest_path"]["directions"], json!(["north", "east"]));
    }

    #[tokio::test]
    async fn post_inline_map_with_undeclared_vertex_is_bad_request() {
        let response = server()
            .post("/api/v1/route")
            .json(&json!({
                "map": fixture_map("broken"),
                "start": "A",
                "target": "C",
                "orientation": "north"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/invalid-request");
    }

    #[tokio::test]
    async fn post_with_both_map_sources_is_bad_request() {
        let response = server()
            .post("/api/v1/route")
            .json(&json!({
                "map_id": "diamond",
                "map": fixture_map("diamond"),
                "start": "A",
                "target": "D",
                "orientation": "north"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_malformed_json_is_problem() {
        let response = server()
            .post("/api/v1/route")
            .text("{ not json")
            .content_type("application/json")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/invalid-request");
    }

    #[tokio::test]
    async fn exhausted_budget_is_unprocessable() {
        let limits = SearchLimits {
            max_paths: Some(3),
            ..SearchLimits::default()
        };
        let server = TestServer::new(app(test_state_with_limits(limits))).unwrap();
        let response = graph(&server, &route_params("warehouse", "0-0", "2-2")).await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["type"], "/problems/search-budget-exceeded");
    }

    #[tokio::test]
    async fn request_id_is_propagated() {
        let response = server()
            .get("/api/graph")
            .add_query_param("mapid", "floor-9")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("trip-7"),
            )
            .await;

        assert_eq!(
            response.headers().get("x-request-id"),
            Some(&HeaderValue::from_static("trip-7"))
        );
        let body: Value = response.json();
        assert_eq!(body["instance"], "trip-7");
    }

    #[tokio::test]
    async fn generated_request_id_matches_problem_instance() {
        let response = graph(&server(), &route_params("floor-9", "A", "D")).await;
        let header = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .expect("request id header");
        let body: Value = response.json();
        assert_eq!(body["instance"], header);
    }

    #[tokio::test]
    async fn maps_are_listed() {
        let response = server().get("/api/maps").await;
        let body: Value = response.json();
        assert_eq!(
            body,
            json!([
                {"id": "cycle", "nodes": 4, "edges": 3},
                {"id": "diamond", "nodes": 4, "edges": 4},
                {"id": "warehouse", "nodes": 9, "edges": 24}
            ])
        );
    }

    #[tokio::test]
    async fn health_endpoints_respond() {
        let server = server();
        assert_eq!(server.get("/health/live").await.status_code(), StatusCode::OK);

        let ready: Value = server.get("/health/ready").await.json();
        assert_eq!(ready["status"], "ok");
        assert_eq!(ready["maps_loaded"], 3);
    }
}
