//! Shortest-path selection over enumerated paths.
//!
//! Cost is the hop count. Every path that achieves the minimum is kept, in
//! input order; choosing a single winner is left to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Direction, MapGraph};
use crate::path::Path;

/// Minimal-length path paired with the direction taken on each hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCandidate {
    path: Vec<String>,
    directions: Vec<Direction>,
}

impl RouteCandidate {
    /// Resolve node labels and direction tags for `path` in one step.
    ///
    /// Directions come from the edges recorded on the path, so parallel edges
    /// between the same nodes keep their own tags.
    pub fn from_path(graph: &MapGraph, path: &Path) -> Result<Self> {
        let nodes = path
            .nodes()
            .map(|node| {
                graph
                    .label(node)
                    .map(str::to_string)
                    .ok_or_else(|| Error::UnknownVertex {
                        vertex: format!("#{}", node),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let directions = path.directions().cloned().collect();

        Ok(Self {
            path: nodes,
            directions,
        })
    }

    /// Node labels from start to target.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Direction tags, one per hop.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    pub fn hop_count(&self) -> usize {
        self.directions.len()
    }
}

/// Paths whose hop count equals the minimum across `paths`, in input order.
pub fn shortest_paths(paths: &[Path]) -> Vec<&Path> {
    let Some(min) = paths.iter().map(Path::len).min() else {
        return Vec::new();
    };
    paths.iter().filter(|path| path.len() == min).collect()
}

/// Select every minimal-length path and materialise its direction sequence.
///
/// Ties are preserved in input order. An empty input yields an empty list.
pub fn find_shortest_paths(graph: &MapGraph, paths: &[Path]) -> Result<Vec<RouteCandidate>> {
    shortest_paths(paths)
        .into_iter()
        .map(|path| RouteCandidate::from_path(graph, path))
        .collect()
}
