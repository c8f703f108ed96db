//! Handlers for the CLI subcommands.
//!
//! `main.rs` parses arguments and dispatches here; each module owns one
//! subcommand.

pub mod inspect;
pub mod paths;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use talide_lib::{load_map, Error as LibError, MapData, SearchLimitKind, SearchLimits};

/// Search budget flags shared by `route` and `paths`.
///
/// A value of `0` disables the corresponding limit.
#[derive(Args, Debug, Clone, Default)]
pub struct LimitArgs {
    /// Maximum hops explored on any branch.
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Maximum number of complete paths collected.
    #[arg(long)]
    pub max_paths: Option<usize>,
    /// Maximum number of edges followed during the search.
    #[arg(long)]
    pub max_expansions: Option<usize>,
}

impl LimitArgs {
    /// Overlay the provided flags on the library defaults.
    pub fn to_limits(&self) -> SearchLimits {
        let defaults = SearchLimits::default();
        let pick = |flag: Option<usize>, default: Option<usize>| match flag {
            Some(0) => None,
            Some(value) => Some(value),
            None => default,
        };
        SearchLimits {
            max_depth: pick(self.max_depth, defaults.max_depth),
            max_paths: pick(self.max_paths, defaults.max_paths),
            max_expansions: pick(self.max_expansions, defaults.max_expansions),
        }
    }
}

pub(crate) fn load_map_file(path: &Path) -> Result<MapData> {
    load_map(path).with_context(|| format!("failed to load map from {}", path.display()))
}

/// The map id reported for a file: its stem, matching how the route service
/// names maps loaded from a directory.
pub(crate) fn map_id_for(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Turn library failures into messages aimed at the person at the terminal.
pub(crate) fn describe_failure(err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownNode { name, suggestions } => {
            anyhow::anyhow!(format_unknown_node_message(&name, &suggestions))
        }
        LibError::RouteNotFound { start, target } => anyhow::anyhow!(
            "No route found between {start} and {target}. Edges are one-way; check that the map \
             links these nodes in this direction."
        ),
        LibError::SearchBudgetExceeded { limit, value } => anyhow::anyhow!(
            "Search stopped at the {limit} limit of {value}. Raise {} (0 disables the limit).",
            limit_flag(limit)
        ),
        LibError::UnknownVertex { vertex } => anyhow::anyhow!(
            "Map is malformed: an edge points at '{vertex}', which is not declared as a node."
        ),
        other => anyhow::Error::new(other),
    }
}

fn limit_flag(limit: SearchLimitKind) -> &'static str {
    match limit {
        SearchLimitKind::Depth => "--max-depth",
        SearchLimitKind::Paths => "--max-paths",
        SearchLimitKind::Expansions => "--max-expansions",
    }
}

fn format_unknown_node_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown node '{name}'.");
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{s}'"))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {joined}?"));
        }
    }
    message
}
