#![allow(dead_code)]

use std::path::PathBuf;

use talide_lib::{build_graph, load_map, MapData, MapGraph, Path};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/maps")
}

pub fn fixture_map(name: &str) -> MapData {
    let path = fixtures_dir().join(format!("{name}.json"));
    load_map(&path).unwrap_or_else(|e| panic!("failed to load fixture {:?}: {}", path, e))
}

pub fn fixture_graph(name: &str) -> MapGraph {
    build_graph(&fixture_map(name)).expect("fixture builds")
}

pub fn node(graph: &MapGraph, label: &str) -> usize {
    graph
        .index_of(label)
        .unwrap_or_else(|| panic!("fixture node {label} present"))
}

pub fn labels(graph: &MapGraph, path: &Path) -> Vec<String> {
    path.nodes()
        .map(|index| graph.label(index).expect("label").to_string())
        .collect()
}
