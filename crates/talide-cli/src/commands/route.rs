//! Route command handler for computing the shortest route across a map.

use std::path::PathBuf;

use anyhow::Result;

use talide_lib::{build_graph, choose_route, route_candidates_on_graph, RouteRequest};

use super::{describe_failure, load_map_file, map_id_for, LimitArgs};
use talide_cli::output::OutputFormat;
use talide_cli::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Map file to route across.
    pub map: PathBuf,
    /// Starting node label.
    pub start: String,
    /// Destination node label.
    pub target: String,
    /// Facing reported alongside the route.
    pub orientation: String,
    /// Map id to echo; defaults to the map file stem.
    pub map_id: Option<String>,
    /// Order id to echo.
    pub order_id: Option<String>,
    /// List every equally short candidate, not just the chosen one.
    pub all: bool,
    pub limits: LimitArgs,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library [`RouteRequest`].
    pub fn to_request(&self) -> RouteRequest {
        let mut request = RouteRequest::new(&self.start, &self.target, &self.orientation)
            .with_limits(self.limits.to_limits());
        if let Some(map_id) = self.map_id.clone().or_else(|| map_id_for(&self.map)) {
            request = request.with_map_id(map_id);
        }
        if let Some(order_id) = &self.order_id {
            request = request.with_order_id(order_id.clone());
        }
        request
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(format: OutputFormat, args: &RouteCommandArgs) -> Result<()> {
    let map = load_map_file(&args.map)?;
    let request = args.to_request();

    let graph = build_graph(&map).map_err(describe_failure)?;
    let candidates = route_candidates_on_graph(&graph, &request).map_err(describe_failure)?;
    tracing::debug!(
        candidates = candidates.len(),
        map = %args.map.display(),
        "route candidates computed"
    );

    let route = choose_route(&candidates, &request).map_err(describe_failure)?;

    let palette = palette_for(format);
    let listing = args.all.then_some(candidates.as_slice());
    print!("{}", format.render_route(&route, listing, palette)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

pub(crate) fn palette_for(format: OutputFormat) -> ColorPalette {
    if format == OutputFormat::Json {
        ColorPalette::plain()
    } else {
        ColorPalette::detect()
    }
}
