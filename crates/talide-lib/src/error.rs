use thiserror::Error;

/// Convenient result alias for the Talide library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an edge references a vertex that was never registered.
    #[error("edge references unknown vertex {vertex}")]
    UnknownVertex { vertex: String },

    /// Raised when a route endpoint is not part of the map.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two nodes.
    #[error("no route found between {start} and {target}")]
    RouteNotFound { start: String, target: String },

    /// Raised when path enumeration exceeds one of its configured limits.
    #[error("search budget exceeded: {limit} limit of {value} reached")]
    SearchBudgetExceeded { limit: SearchLimitKind, value: usize },

    /// Raised when map data fails validation.
    #[error("invalid map data: {message}")]
    InvalidMap { message: String },

    /// Raised when a route candidate has no nodes to render.
    #[error("route was empty")]
    EmptyRoute,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// `true` when the error represents the "no route exists" outcome rather than a fault.
    pub fn is_route_not_found(&self) -> bool {
        matches!(self, Error::RouteNotFound { .. })
    }
}

/// Which search limit was hit when enumeration gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimitKind {
    Depth,
    Paths,
    Expansions,
}

impl std::fmt::Display for SearchLimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            SearchLimitKind::Depth => "depth",
            SearchLimitKind::Paths => "path count",
            SearchLimitKind::Expansions => "expansion",
        };
        f.write_str(value)
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
