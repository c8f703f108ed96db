//! Route computation for delivery vehicles.
//!
//! This module provides:
//! - [`RouteRequest`] - start, target and orientation for a single routing call
//! - [`RouteResult`] - the chosen path with its direction sequence
//! - [`compute_route`] - main entry point, from raw map data to a route
//! - [`find_shortest_paths`] - minimal-length selection over enumerated paths
//!
//! Every call builds its own [`MapGraph`] from the supplied [`MapData`], so
//! routing holds no state between requests and is safe to run concurrently.
//!
//! # Example
//!
//! ```
//! use talide_lib::{compute_route, MapData, MapNode, RouteRequest};
//!
//! let map = MapData::new(vec![
//!     MapNode::new("A").edge("B", "north"),
//!     MapNode::new("B"),
//! ]);
//! let request = RouteRequest::new("A", "B", "east");
//! let route = compute_route(&map, &request)?;
//! assert_eq!(route.path, vec!["A", "B"]);
//! # Ok::<(), talide_lib::Error>(())
//! ```

mod select;

pub use select::{find_shortest_paths, shortest_paths, RouteCandidate};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{build_graph, Direction, MapGraph, NodeIndex};
use crate::map::MapData;
use crate::path::{find_all_paths_with_limits, SearchLimits};

/// Number of fuzzy suggestions attached to unknown-node errors.
const NODE_SUGGESTIONS: usize = 3;

/// High-level routing request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub target: String,
    /// Vehicle heading at the start; echoed back unchanged.
    pub orientation: String,
    pub map_id: Option<String>,
    pub order_id: Option<String>,
    pub limits: SearchLimits,
}

impl RouteRequest {
    pub fn new(
        start: impl Into<String>,
        target: impl Into<String>,
        orientation: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            target: target.into(),
            orientation: orientation.into(),
            map_id: None,
            order_id: None,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_map_id(mut self, map_id: impl Into<String>) -> Self {
        self.map_id = Some(map_id.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Route returned to callers of [`compute_route`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Node labels from start to target.
    pub path: Vec<String>,
    /// Direction tag of each hop, parallel to consecutive `path` pairs.
    pub directions: Vec<Direction>,
    pub orientation: String,
    #[serde(rename = "mapid")]
    pub map_id: Option<String>,
    #[serde(rename = "orderid")]
    pub order_id: Option<String>,
    /// Number of equally short candidates the route was chosen from.
    #[serde(skip)]
    pub alternatives: usize,
}

impl RouteResult {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.directions.len()
    }

    pub fn start(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    pub fn target(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// `true` when the vehicle is already at its destination.
    pub fn arrived(&self) -> bool {
        self.path.len() == 1
    }
}

/// Compute the route for `request` over `map`.
///
/// Builds the graph, enumerates every simple path, keeps the shortest ones and
/// returns the first of them. Ties are broken by discovery order, so identical
/// input always produces the same route.
///
/// # Errors
///
/// - [`Error::InvalidMap`] / [`Error::UnknownVertex`] for malformed map data
/// - [`Error::UnknownNode`] when start or target is not on the map
/// - [`Error::SearchBudgetExceeded`] when enumeration hits `request.limits`
/// - [`Error::RouteNotFound`] when the target is unreachable
pub fn compute_route(map: &MapData, request: &RouteRequest) -> Result<RouteResult> {
    let candidates = compute_route_candidates(map, request)?;
    let route = choose_route(&candidates, request)?;
    tracing::debug!(
        start = %request.start,
        target = %request.target,
        hops = route.hop_count(),
        alternatives = route.alternatives,
        "route computed"
    );
    Ok(route)
}

/// Turn the first of `candidates` into the [`RouteResult`] for `request`.
///
/// Candidates arrive in enumeration order, so the pick is deterministic for a
/// given map. An empty slice yields [`Error::RouteNotFound`].
pub fn choose_route(candidates: &[RouteCandidate], request: &RouteRequest) -> Result<RouteResult> {
    let chosen = candidates
        .first()
        .ok_or_else(|| route_not_found(request))?;
    Ok(RouteResult {
        path: chosen.path().to_vec(),
        directions: chosen.directions().to_vec(),
        orientation: request.orientation.clone(),
        map_id: request.map_id.clone(),
        order_id: request.order_id.clone(),
        alternatives: candidates.len(),
    })
}

/// Compute every minimal-length candidate for `request` over `map`.
///
/// Fails with [`Error::RouteNotFound`] rather than returning an empty list.
pub fn compute_route_candidates(
    map: &MapData,
    request: &RouteRequest,
) -> Result<Vec<RouteCandidate>> {
    let graph = build_graph(map)?;
    route_candidates_on_graph(&graph, request)
}

/// Same as [`compute_route_candidates`] for a graph that is already built.
pub fn route_candidates_on_graph(
    graph: &MapGraph,
    request: &RouteRequest,
) -> Result<Vec<RouteCandidate>> {
    let start = resolve_node(graph, &request.start)?;
    let target = resolve_node(graph, &request.target)?;

    let paths = find_all_paths_with_limits(graph, start, target, &request.limits)?;
    let candidates = find_shortest_paths(graph, &paths)?;
    if candidates.is_empty() {
        return Err(route_not_found(request));
    }
    Ok(candidates)
}

/// Resolve a node label to its index, with suggestions on failure.
pub fn resolve_node(graph: &MapGraph, name: &str) -> Result<NodeIndex> {
    graph.index_of(name).ok_or_else(|| Error::UnknownNode {
        name: name.to_string(),
        suggestions: graph.suggest_nodes(name, NODE_SUGGESTIONS),
    })
}

fn route_not_found(request: &RouteRequest) -> Error {
    Error::RouteNotFound {
        start: request.start.clone(),
        target: request.target.clone(),
    }
}
