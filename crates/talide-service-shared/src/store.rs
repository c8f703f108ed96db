//! Read-only store of the maps a service can route over.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use talide_lib::{build_graph, load_map, Error as LibError, MapData, MapGraph};

use crate::state::AppStateError;

/// Built map graphs keyed by map id.
///
/// Graphs are built once when a map is inserted, so malformed maps are
/// rejected up front and requests only pay for path enumeration.
#[derive(Debug, Clone, Default)]
pub struct MapStore {
    maps: BTreeMap<String, MapGraph>,
}

/// Listing entry for one stored map.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MapSummary {
    pub id: String,
    pub nodes: usize,
    pub edges: usize,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir`; the file stem becomes the map id.
    ///
    /// Any map that fails to load or build aborts the whole load with an
    /// error naming the file.
    pub fn load_dir(dir: &Path) -> Result<Self, AppStateError> {
        if !dir.is_dir() {
            return Err(AppStateError::MapsDirNotFound(dir.display().to_string()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut store = Self::new();
        for path in files {
            let Some(id) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let map_error = |source| AppStateError::MapLoad {
                path: path.display().to_string(),
                source,
            };
            let map = load_map(&path).map_err(map_error)?;
            store.insert(id.clone(), &map).map_err(map_error)?;
            tracing::info!(
                map_id = %id,
                nodes = map.node_count(),
                edges = map.edge_count(),
                "map loaded"
            );
        }
        Ok(store)
    }

    /// Build and store `map` under `id`, replacing any previous map.
    pub fn insert(&mut self, id: impl Into<String>, map: &MapData) -> Result<(), LibError> {
        let graph = build_graph(map)?;
        self.maps.insert(id.into(), graph);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&MapGraph> {
        self.maps.get(id)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// One entry per map, sorted by id.
    pub fn summaries(&self) -> Vec<MapSummary> {
        self.maps
            .iter()
            .map(|(id, graph)| MapSummary {
                id: id.clone(),
                nodes: graph.node_count(),
                edges: graph.edge_count(),
            })
            .collect()
    }
}
