use crate::error::{Error, Result, SearchLimitKind};
use crate::graph::{Direction, EdgeId, MapGraph, NodeIndex};

/// Upper bounds applied to exhaustive path enumeration.
///
/// `None` disables the corresponding limit. Exceeding any limit aborts the
/// search with [`Error::SearchBudgetExceeded`]; partial results are never
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of hops on any explored branch.
    pub max_depth: Option<usize>,
    /// Maximum number of complete paths recorded.
    pub max_paths: Option<usize>,
    /// Maximum number of edges followed across the whole search.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    pub const DEFAULT_MAX_PATHS: usize = 100_000;
    pub const DEFAULT_MAX_EXPANSIONS: usize = 1_000_000;

    /// Limits with every bound disabled.
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_paths: None,
            max_expansions: None,
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
            max_paths: Some(Self::DEFAULT_MAX_PATHS),
            max_expansions: Some(Self::DEFAULT_MAX_EXPANSIONS),
        }
    }
}

/// Single traversal step: the edge used and the node it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub edge: EdgeId,
    pub node: NodeIndex,
    pub direction: Direction,
}

/// Simple path through a [`MapGraph`].
///
/// Records the edge taken for every hop, so parallel edges between the same
/// pair of nodes remain distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    start: NodeIndex,
    hops: Vec<Hop>,
}

impl Path {
    /// Zero-length path that starts and ends at `start`.
    pub fn trivial(start: NodeIndex) -> Self {
        Self {
            start,
            hops: Vec::new(),
        }
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn target(&self) -> NodeIndex {
        self.hops.last().map(|hop| hop.node).unwrap_or(self.start)
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of edges traversed.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Visited nodes in order, including the start.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::once(self.start).chain(self.hops.iter().map(|hop| hop.node))
    }

    /// Edge identifiers in traversal order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.hops.iter().map(|hop| hop.edge)
    }

    /// Direction tags in traversal order, one per hop.
    pub fn directions(&self) -> impl Iterator<Item = &Direction> + '_ {
        self.hops.iter().map(|hop| &hop.direction)
    }
}

/// Enumerate every simple path from `start` to `target` with default limits.
pub fn find_all_paths(graph: &MapGraph, start: NodeIndex, target: NodeIndex) -> Result<Vec<Path>> {
    find_all_paths_with_limits(graph, start, target, &SearchLimits::default())
}

/// Enumerate every simple path from `start` to `target`.
///
/// Runs an exhaustive depth-first search that never revisits a node already on
/// the current branch, so cycles cannot trap the search. Reaching `target`
/// records the path and ends that branch; `start == target` yields the single
/// zero-length path. Paths are returned in discovery order, which follows edge
/// insertion order and is therefore stable for identical input. No route, or an
/// index outside the graph, yields an empty list.
///
/// The number of simple paths grows exponentially with the branching factor.
/// This is intended for facility-scale maps with a small, bounded degree;
/// `limits` keeps pathological inputs from running unbounded.
pub fn find_all_paths_with_limits(
    graph: &MapGraph,
    start: NodeIndex,
    target: NodeIndex,
    limits: &SearchLimits,
) -> Result<Vec<Path>> {
    if start >= graph.node_count() || target >= graph.node_count() {
        return Ok(Vec::new());
    }
    if start == target {
        return Ok(vec![Path::trivial(start)]);
    }

    let mut on_branch = vec![false; graph.node_count()];
    let mut hops: Vec<Hop> = Vec::new();
    // Each frame is a node on the current branch and the next edge to try.
    let mut stack: Vec<(NodeIndex, usize)> = vec![(start, 0)];
    let mut paths = Vec::new();
    let mut expansions = 0usize;

    on_branch[start] = true;

    while let Some(&(node, cursor)) = stack.last() {
        let Some(edge) = graph.neighbours(node).get(cursor) else {
            stack.pop();
            on_branch[node] = false;
            if node != start {
                hops.pop();
            }
            continue;
        };
        if let Some(frame) = stack.last_mut() {
            frame.1 += 1;
        }

        if on_branch[edge.target] {
            continue;
        }

        expansions += 1;
        check_limit(SearchLimitKind::Expansions, limits.max_expansions, expansions)?;

        let hop = Hop {
            edge: edge.id,
            node: edge.target,
            direction: edge.direction.clone(),
        };

        let depth = hops.len() + 1;
        if edge.target == target {
            if let Some(max) = limits.max_depth.filter(|max| depth > *max) {
                return Err(budget_exceeded(SearchLimitKind::Depth, max));
            }
            if let Some(max) = limits.max_paths {
                if paths.len() >= max {
                    return Err(budget_exceeded(SearchLimitKind::Paths, max));
                }
            }
            let mut complete = hops.clone();
            complete.push(hop);
            paths.push(Path {
                start,
                hops: complete,
            });
            continue;
        }

        if let Some(max) = limits.max_depth {
            if depth >= max {
                let extendable = graph
                    .neighbours(edge.target)
                    .iter()
                    .any(|next| !on_branch[next.target] && next.target != edge.target);
                if extendable {
                    return Err(budget_exceeded(SearchLimitKind::Depth, max));
                }
                continue;
            }
        }

        on_branch[edge.target] = true;
        hops.push(hop);
        stack.push((edge.target, 0));
    }

    tracing::debug!(
        start = graph.label(start).unwrap_or_default(),
        target = graph.label(target).unwrap_or_default(),
        paths = paths.len(),
        expansions,
        "enumerated simple paths"
    );
    Ok(paths)
}

fn check_limit(kind: SearchLimitKind, limit: Option<usize>, value: usize) -> Result<()> {
    match limit {
        Some(max) if value > max => Err(budget_exceeded(kind, max)),
        _ => Ok(()),
    }
}

fn budget_exceeded(limit: SearchLimitKind, value: usize) -> Error {
    tracing::warn!(limit = %limit, value, "path enumeration aborted");
    Error::SearchBudgetExceeded { limit, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> MapGraph {
        let mut graph = MapGraph::new();
        for node in nodes {
            graph.add_vertex(node);
        }
        for (from, to, direction) in edges {
            graph.add_edge(from, to, (*direction).into()).unwrap();
        }
        graph
    }

    fn labels(graph: &MapGraph, path: &Path) -> Vec<String> {
        path.nodes()
            .map(|node| graph.label(node).unwrap().to_string())
            .collect()
    }

    #[test]
    fn trivial_path_when_start_equals_target() {
        let g = graph(&["A", "B"], &[("A", "B", "north")]);
        let a = g.index_of("A").unwrap();
        let paths = find_all_paths(&g, a, a).unwrap();
        assert_eq!(paths, vec![Path::trivial(a)]);
        assert!(paths[0].is_empty());
        assert_eq!(paths[0].directions().count(), 0);
    }

    #[test]
    fn recording_stops_expansion_at_target() {
        // B -> C continues past the target; those paths must not be reported.
        let g = graph(
            &["A", "B", "C"],
            &[("A", "B", "north"), ("B", "C", "east"), ("C", "B", "west")],
        );
        let paths = find_all_paths(&g, 0, 1).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(labels(&g, &paths[0]), vec!["A", "B"]);
    }

    #[test]
    fn self_loops_are_ignored() {
        let g = graph(&["A", "B"], &[("A", "A", "spin"), ("A", "B", "north")]);
        let paths = find_all_paths(&g, 0, 1).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
    }

    #[test]
    fn out_of_range_indices_yield_no_paths() {
        let g = graph(&["A"], &[]);
        assert!(find_all_paths(&g, 0, 7).unwrap().is_empty());
        assert!(find_all_paths(&g, 7, 7).unwrap().is_empty());
    }

    #[test]
    fn path_limit_is_enforced() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", "north"),
                ("A", "C", "east"),
                ("B", "D", "east"),
                ("C", "D", "north"),
            ],
        );
        let limits = SearchLimits {
            max_paths: Some(1),
            ..SearchLimits::unbounded()
        };
        let err = find_all_paths_with_limits(&g, 0, 3, &limits).unwrap_err();
        assert!(matches!(
            err,
            Error::SearchBudgetExceeded {
                limit: SearchLimitKind::Paths,
                value: 1
            }
        ));

        let limits = SearchLimits {
            max_paths: Some(2),
            ..SearchLimits::unbounded()
        };
        assert_eq!(find_all_paths_with_limits(&g, 0, 3, &limits).unwrap().len(), 2);
    }

    #[test]
    fn depth_limit_fails_instead_of_truncating() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B", "north"), ("B", "C", "north"), ("C", "D", "north")],
        );
        let limits = SearchLimits {
            max_depth: Some(2),
            ..SearchLimits::unbounded()
        };
        let err = find_all_paths_with_limits(&g, 0, 3, &limits).unwrap_err();
        assert!(matches!(
            err,
            Error::SearchBudgetExceeded {
                limit: SearchLimitKind::Depth,
                ..
            }
        ));

        let limits = SearchLimits {
            max_depth: Some(3),
            ..SearchLimits::unbounded()
        };
        assert_eq!(find_all_paths_with_limits(&g, 0, 3, &limits).unwrap().len(), 1);
    }

    #[test]
    fn zero_depth_limit_rejects_any_hop() {
        let g = graph(&["A", "B"], &[("A", "B", "north")]);
        let limits = SearchLimits {
            max_depth: Some(0),
            ..SearchLimits::unbounded()
        };
        let err = find_all_paths_with_limits(&g, 0, 1, &limits).unwrap_err();
        assert!(matches!(
            err,
            Error::SearchBudgetExceeded {
                limit: SearchLimitKind::Depth,
                value: 0
            }
        ));

        let paths = find_all_paths_with_limits(&g, 0, 0, &limits).unwrap();
        assert_eq!(paths, vec![Path::trivial(0)]);
    }

    #[test]
    fn depth_limit_tolerates_dead_ends() {
        // C is a dead end at the depth limit; nothing is cut off.
        let g = graph(
            &["A", "B", "C", "T"],
            &[("A", "B", "north"), ("B", "C", "north"), ("A", "T", "east")],
        );
        let limits = SearchLimits {
            max_depth: Some(2),
            ..SearchLimits::unbounded()
        };
        let paths = find_all_paths_with_limits(&g, 0, 3, &limits).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn expansion_limit_is_enforced() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B", "north"), ("B", "C", "north"), ("C", "D", "north")],
        );
        let limits = SearchLimits {
            max_expansions: Some(2),
            ..SearchLimits::unbounded()
        };
        let err = find_all_paths_with_limits(&g, 0, 3, &limits).unwrap_err();
        assert!(matches!(
            err,
            Error::SearchBudgetExceeded {
                limit: SearchLimitKind::Expansions,
                value: 2
            }
        ));
    }
}
