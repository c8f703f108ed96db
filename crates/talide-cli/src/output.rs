//! Output formatting for CLI results.
//!
//! Every renderer returns a `String` so the command handlers stay in charge
//! of where output goes and tests can assert on the exact text.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use talide_lib::{RouteCandidate, RouteRenderMode, RouteResult, RouteSummary};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output style selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly listing of every step.
    #[default]
    Text,
    /// Markdown suitable for chat or notes.
    Rich,
    /// One line per node with minimal decoration.
    Basic,
    /// Machine-readable JSON.
    Json,
}

/// Structural facts about a loaded map.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MapOverview {
    pub nodes: usize,
    pub edges: usize,
    /// Nodes without outgoing edges.
    pub dead_ends: Vec<String>,
    /// Nodes with neither incoming nor outgoing edges.
    pub isolated: Vec<String>,
    /// Distinct direction tags, in first-seen order.
    pub directions: Vec<String>,
}

#[derive(Serialize)]
struct RouteDocument<'a> {
    shortest_path: &'a RouteResult,
    hops: usize,
    alternatives: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<&'a [RouteCandidate]>,
}

#[derive(Serialize)]
struct PathEntry<'a> {
    #[serde(flatten)]
    candidate: &'a RouteCandidate,
    hops: usize,
}

#[derive(Serialize)]
struct PathsDocument<'a> {
    start: &'a str,
    target: &'a str,
    count: usize,
    paths: Vec<PathEntry<'a>>,
}

impl OutputFormat {
    /// Render the chosen route, followed by every tied candidate when
    /// `candidates` is provided.
    pub fn render_route(
        self,
        route: &RouteResult,
        candidates: Option<&[RouteCandidate]>,
        palette: ColorPalette,
    ) -> Result<String> {
        if self == OutputFormat::Json {
            let document = RouteDocument {
                shortest_path: route,
                hops: route.hop_count(),
                alternatives: route.alternatives,
                candidates,
            };
            return serde_json::to_string_pretty(&document)
                .context("failed to serialize route as JSON");
        }

        let summary =
            RouteSummary::from_result(route).context("failed to build route summary")?;
        let mut buffer = match self {
            OutputFormat::Rich => summary.render(RouteRenderMode::RichText),
            OutputFormat::Basic => render_basic(&summary, palette),
            _ => summary.render(RouteRenderMode::PlainText),
        };

        if let Some(candidates) = candidates {
            let _ = writeln!(buffer);
            let _ = writeln!(buffer, "Equally short candidates:");
            for (index, candidate) in candidates.iter().enumerate() {
                let _ = writeln!(
                    buffer,
                    "  {}. {}",
                    index + 1,
                    describe_candidate(candidate, palette)
                );
            }
        }
        Ok(buffer)
    }

    /// Render an enumeration of paths between two nodes.
    pub fn render_paths(
        self,
        start: &str,
        target: &str,
        paths: &[RouteCandidate],
        palette: ColorPalette,
    ) -> Result<String> {
        if self == OutputFormat::Json {
            let document = PathsDocument {
                start,
                target,
                count: paths.len(),
                paths: paths
                    .iter()
                    .map(|candidate| PathEntry {
                        candidate,
                        hops: candidate.hop_count(),
                    })
                    .collect(),
            };
            return serde_json::to_string_pretty(&document)
                .context("failed to serialize paths as JSON");
        }

        let mut buffer = String::new();
        let Some(shortest) = paths.iter().map(RouteCandidate::hop_count).min() else {
            let _ = writeln!(buffer, "No paths from {start} to {target}.");
            return Ok(buffer);
        };

        let noun = if paths.len() == 1 { "path" } else { "paths" };
        let _ = writeln!(
            buffer,
            "{} {noun} from {start} to {target} (shortest: {shortest} hops):",
            format_with_separators(paths.len() as u64),
        );
        for candidate in paths {
            let line = describe_candidate(candidate, palette);
            match self {
                OutputFormat::Rich => {
                    let _ = writeln!(buffer, "* `[{}]` {}", candidate.hop_count(), line);
                }
                _ => {
                    let _ = writeln!(
                        buffer,
                        "  {}[{}]{} {}",
                        palette.gray,
                        candidate.hop_count(),
                        palette.reset,
                        line
                    );
                }
            }
        }
        Ok(buffer)
    }

    /// Render the structural overview of a map file.
    pub fn render_overview(self, source: &str, overview: &MapOverview) -> Result<String> {
        if self == OutputFormat::Json {
            return serde_json::to_string_pretty(overview)
                .context("failed to serialize map overview as JSON");
        }

        let mut buffer = String::new();
        let _ = writeln!(buffer, "Map: {source}");
        let _ = writeln!(buffer, "Nodes: {}", format_with_separators(overview.nodes as u64));
        let _ = writeln!(buffer, "Edges: {}", format_with_separators(overview.edges as u64));
        let _ = writeln!(buffer, "Directions: {}", join_or_none(&overview.directions));
        let _ = writeln!(buffer, "Dead ends: {}", join_or_none(&overview.dead_ends));
        let _ = writeln!(buffer, "Isolated: {}", join_or_none(&overview.isolated));
        Ok(buffer)
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// `A -> B -> D (north, east)` with node labels and direction tags styled.
fn describe_candidate(candidate: &RouteCandidate, palette: ColorPalette) -> String {
    let nodes = candidate
        .path()
        .iter()
        .map(|node| format!("{}{}{}", palette.white_bold, node, palette.reset))
        .collect::<Vec<_>>()
        .join(" -> ");
    if candidate.directions().is_empty() {
        return nodes;
    }
    let directions = candidate
        .directions()
        .iter()
        .map(|direction| format!("{}{}{}", palette.cyan, direction, palette.reset))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{nodes} ({directions})")
}

fn render_basic(summary: &RouteSummary, palette: ColorPalette) -> String {
    let mut buffer = String::new();
    let last = summary.steps.len().saturating_sub(1);
    for (position, step) in summary.steps.iter().enumerate() {
        let (marker, badge) = if position == 0 {
            ("+", format!(" {}START{}", palette.tag_start, palette.reset))
        } else if position == last {
            ("-", format!(" {}GOAL{}", palette.tag_goal, palette.reset))
        } else {
            ("|", String::new())
        };
        let direction = step
            .direction
            .as_ref()
            .map(|direction| format!(" {}{}{}", palette.cyan, direction, palette.reset))
            .unwrap_or_default();
        let _ = writeln!(
            buffer,
            "{marker} {}{}{}{direction}{badge}",
            palette.white_bold, step.node, palette.reset
        );
    }
    buffer
}
