use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::map::MapData;

/// Dense index of a node inside a [`MapGraph`].
pub type NodeIndex = usize;

/// Graph-unique identifier of an edge, assigned in insertion order.
pub type EdgeId = usize;

/// Similarity floor for node-name suggestions (Jaro-Winkler, 0.0..=1.0).
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Heading or turn instruction taken when traversing an edge.
///
/// Tags are opaque to the routing core; maps typically use compass headings
/// such as `north` or `east`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Direction(String);

impl Direction {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Direction {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for Direction {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Directed edge within the map graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub target: NodeIndex,
    pub direction: Direction,
}

/// In-memory directed graph of waypoints and the segments between them.
///
/// Node labels are interned to dense indices on insertion. Outgoing edges keep
/// their insertion order, which makes traversal order deterministic.
#[derive(Debug, Clone, Default)]
pub struct MapGraph {
    labels: Vec<String>,
    index: HashMap<String, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl MapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known number of nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            labels: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Register a node. Adding an existing label returns its current index.
    pub fn add_vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&existing) = self.index.get(id) {
            return existing;
        }
        let next = self.labels.len();
        self.labels.push(id.to_string());
        self.index.insert(id.to_string(), next);
        self.adjacency.push(Vec::new());
        next
    }

    /// Register a directed edge between two known nodes.
    ///
    /// Both endpoints must already be registered; otherwise the call fails with
    /// [`Error::UnknownVertex`] and the graph is left untouched. Parallel edges
    /// are kept when their direction tags differ, while re-inserting an
    /// identical `(from, to, direction)` triple returns the existing edge.
    pub fn add_edge(&mut self, from: &str, to: &str, direction: Direction) -> Result<EdgeId> {
        let source = self.require(from)?;
        let target = self.require(to)?;

        if let Some(existing) = self.adjacency[source]
            .iter()
            .find(|edge| edge.target == target && edge.direction == direction)
        {
            return Ok(existing.id);
        }

        let id = self.edge_count;
        self.adjacency[source].push(Edge {
            id,
            target,
            direction,
        });
        self.edge_count += 1;
        Ok(id)
    }

    /// Outgoing edges of `node` in insertion order.
    pub fn neighbours(&self, node: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up the index for a node label.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Label registered for `node`, if the index is in range.
    pub fn label(&self, node: NodeIndex) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Node labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Suggest registered labels similar to `id`, best match first.
    pub fn suggest_nodes(&self, id: &str, limit: usize) -> Vec<String> {
        let needle = id.to_lowercase();
        let mut scored: Vec<(f64, &String)> = self
            .labels
            .iter()
            .map(|label| (strsim::jaro_winkler(&needle, &label.to_lowercase()), label))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, label)| label.clone())
            .collect()
    }

    fn require(&self, id: &str) -> Result<NodeIndex> {
        self.index_of(id).ok_or_else(|| Error::UnknownVertex {
            vertex: id.to_string(),
        })
    }
}

/// Build a routing graph from a raw map description.
///
/// Every node record is registered before any edge is inserted, so records may
/// reference nodes declared later in the list. Edges pointing at nodes that are
/// never declared fail with [`Error::UnknownVertex`].
pub fn build_graph(map: &MapData) -> Result<MapGraph> {
    map.validate()?;

    let mut graph = MapGraph::with_capacity(map.node_count());
    for node in &map.nodes {
        graph.add_vertex(&node.id);
    }
    for node in &map.nodes {
        for edge in &node.edges {
            graph.add_edge(&node.id, &edge.vertex, edge.direction.clone())?;
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built map graph"
    );
    Ok(graph)
}
