//! Paths command handler: list every simple path between two nodes.

use std::path::PathBuf;

use anyhow::Result;

use talide_lib::{
    build_graph, find_all_paths_with_limits, find_shortest_paths, resolve_node, RouteCandidate,
};

use super::route::palette_for;
use super::{describe_failure, load_map_file, LimitArgs};
use talide_cli::output::OutputFormat;

/// Arguments for the paths command.
#[derive(Debug, Clone)]
pub struct PathsCommandArgs {
    pub map: PathBuf,
    pub start: String,
    pub target: String,
    /// Keep only the minimal-length paths.
    pub shortest: bool,
    pub limits: LimitArgs,
}

/// Handle the paths subcommand.
///
/// Unlike `route`, an unreachable target is not an error here: the listing is
/// simply empty.
pub fn handle_paths_command(format: OutputFormat, args: &PathsCommandArgs) -> Result<()> {
    let map = load_map_file(&args.map)?;
    let graph = build_graph(&map).map_err(describe_failure)?;
    let start = resolve_node(&graph, &args.start).map_err(describe_failure)?;
    let target = resolve_node(&graph, &args.target).map_err(describe_failure)?;

    let paths = find_all_paths_with_limits(&graph, start, target, &args.limits.to_limits())
        .map_err(describe_failure)?;
    let candidates = if args.shortest {
        find_shortest_paths(&graph, &paths)
    } else {
        paths
            .iter()
            .map(|path| RouteCandidate::from_path(&graph, path))
            .collect()
    }
    .map_err(describe_failure)?;
    tracing::debug!(
        enumerated = paths.len(),
        listed = candidates.len(),
        "paths enumerated"
    );

    let rendered =
        format.render_paths(&args.start, &args.target, &candidates, palette_for(format))?;
    print!("{rendered}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
