//! Talide routing library entry points.
//!
//! This crate turns a raw map description into a directed map graph,
//! enumerates the simple paths between two waypoints, keeps the shortest ones
//! and reports the chosen route with its turn-by-turn direction tags.
//! Higher-level consumers (CLI, HTTP services) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod map;
pub mod output;
pub mod path;
pub mod routing;

pub use error::{Error, Result, SearchLimitKind};
pub use graph::{build_graph, Direction, Edge, EdgeId, MapGraph, NodeIndex};
pub use map::{load_map, MapData, MapEdge, MapNode};
pub use output::{RouteRenderMode, RouteStep, RouteSummary};
pub use path::{find_all_paths, find_all_paths_with_limits, Hop, Path, SearchLimits};
pub use routing::{
    choose_route, compute_route, compute_route_candidates, find_shortest_paths, resolve_node,
    route_candidates_on_graph, shortest_paths, RouteCandidate, RouteRequest, RouteResult,
};
