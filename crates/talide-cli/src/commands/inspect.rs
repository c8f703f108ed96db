//! Inspect command handler: summarise the structure of a map file.

use std::path::Path;

use anyhow::Result;

use talide_lib::{build_graph, MapGraph};

use super::{describe_failure, load_map_file};
use talide_cli::output::{MapOverview, OutputFormat};

/// Handle the inspect subcommand.
pub fn handle_inspect_command(format: OutputFormat, path: &Path) -> Result<()> {
    let map = load_map_file(path)?;
    let graph = build_graph(&map).map_err(describe_failure)?;
    let overview = overview(&graph);

    let source = path.display().to_string();
    print!("{}", format.render_overview(&source, &overview)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Collect node, edge and connectivity facts from a built graph.
pub fn overview(graph: &MapGraph) -> MapOverview {
    let mut incoming = vec![0usize; graph.node_count()];
    let mut directions: Vec<String> = Vec::new();
    for node in 0..graph.node_count() {
        for edge in graph.neighbours(node) {
            incoming[edge.target] += 1;
            if !directions.iter().any(|seen| seen == edge.direction.as_str()) {
                directions.push(edge.direction.to_string());
            }
        }
    }

    let mut dead_ends = Vec::new();
    let mut isolated = Vec::new();
    for (node, label) in graph.labels().enumerate() {
        if graph.neighbours(node).is_empty() {
            dead_ends.push(label.to_string());
            if incoming[node] == 0 {
                isolated.push(label.to_string());
            }
        }
    }

    MapOverview {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        dead_ends,
        isolated,
        directions,
    }
}
