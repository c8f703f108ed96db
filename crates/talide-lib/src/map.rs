//! Raw map descriptions as produced by the map editor and stored by the map service.
//!
//! A map is an ordered list of node records, each declaring its outgoing edges:
//!
//! ```json
//! [
//!   {"id": "A", "edges": [{"vertex": "B", "direction": "north"}]},
//!   {"id": "B", "edges": []}
//! ]
//! ```
//!
//! Stored map documents wrap the same list as `{"map_data": [...]}`; both
//! shapes are accepted when parsing. Node ids and edge vertices may be JSON
//! strings or numbers; numbers keep their JSON spelling as the label
//! (`7`, `18446744073709551615`, `1.5`).

use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::graph::Direction;

/// Validated-on-demand map description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<MapNode>")]
pub struct MapData {
    pub nodes: Vec<MapNode>,
}

/// Node record within a map description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    #[serde(deserialize_with = "deserialize_label")]
    pub id: String,
    #[serde(default)]
    pub edges: Vec<MapEdge>,
}

/// Outgoing edge declared on a node record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEdge {
    #[serde(deserialize_with = "deserialize_label")]
    pub vertex: String,
    pub direction: Direction,
}

// Field errors from the node list are kept intact for both document shapes.
impl<'de> Deserialize<'de> for MapData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = match Value::deserialize(deserializer)? {
            list @ Value::Array(_) => list,
            Value::Object(mut document) => document
                .remove("map_data")
                .ok_or_else(|| de::Error::missing_field("map_data"))?,
            other => {
                return Err(de::Error::custom(format!(
                    "expected a list of map nodes or a stored map document, found {}",
                    json_kind(&other)
                )));
            }
        };
        let nodes = Vec::<MapNode>::deserialize(list).map_err(de::Error::custom)?;
        Ok(MapData { nodes })
    }
}

impl From<MapData> for Vec<MapNode> {
    fn from(map: MapData) -> Self {
        map.nodes
    }
}

// Editor exports occasionally carry numeric node ids.
fn deserialize_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or numeric label, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

impl MapNode {
    /// Convenience constructor used by tests and callers assembling maps in code.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            edges: Vec::new(),
        }
    }

    /// Append an outgoing edge to this node record.
    pub fn edge(mut self, vertex: impl Into<String>, direction: impl Into<Direction>) -> Self {
        self.edges.push(MapEdge {
            vertex: vertex.into(),
            direction: direction.into(),
        });
        self
    }
}

impl MapData {
    pub fn new(nodes: Vec<MapNode>) -> Self {
        Self { nodes }
    }

    /// Parse a map description from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of node records (duplicates included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of declared edges across all node records.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    /// Reject records with blank identifiers or direction tags.
    ///
    /// Unknown edge targets are not checked here; graph construction reports
    /// them as [`Error::UnknownVertex`].
    pub fn validate(&self) -> Result<()> {
        for (position, node) in self.nodes.iter().enumerate() {
            if node.id.trim().is_empty() {
                return Err(Error::InvalidMap {
                    message: format!("node record {} has an empty id", position),
                });
            }
            for edge in &node.edges {
                if edge.vertex.trim().is_empty() {
                    return Err(Error::InvalidMap {
                        message: format!("node {} declares an edge with an empty vertex", node.id),
                    });
                }
                if edge.direction.as_str().trim().is_empty() {
                    return Err(Error::InvalidMap {
                        message: format!(
                            "edge {} -> {} has an empty direction",
                            node.id, edge.vertex
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Load a map description from a JSON file.
pub fn load_map(path: &Path) -> Result<MapData> {
    let contents = fs::read_to_string(path)?;
    let map = MapData::from_json_str(&contents)?;
    tracing::debug!(
        path = %path.display(),
        nodes = map.node_count(),
        edges = map.edge_count(),
        "loaded map description"
    );
    Ok(map)
}
