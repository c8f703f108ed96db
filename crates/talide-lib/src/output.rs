use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Direction;
use crate::routing::RouteResult;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Node visited along a route, with the direction used to reach it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Structured, display-ready view of a [`RouteResult`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub start: String,
    pub target: String,
    pub orientation: String,
    pub hops: usize,
    pub alternatives: usize,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Pair each node of the route with the direction taken to arrive there.
    pub fn from_result(route: &RouteResult) -> Result<Self> {
        let (Some(start), Some(target)) = (route.start(), route.target()) else {
            return Err(Error::EmptyRoute);
        };

        let steps = route
            .path
            .iter()
            .enumerate()
            .map(|(index, node)| RouteStep {
                index,
                node: node.clone(),
                direction: index
                    .checked_sub(1)
                    .and_then(|hop| route.directions.get(hop))
                    .cloned(),
            })
            .collect();

        Ok(Self {
            start: start.to_string(),
            target: target.to_string(),
            orientation: route.orientation.clone(),
            hops: route.hop_count(),
            alternatives: route.alternatives,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, facing {})",
            self.start, self.target, self.hops, self.orientation
        );
        for step in &self.steps {
            match &step.direction {
                Some(direction) => {
                    let _ = writeln!(buffer, "{:>3}: {} ({})", step.index, step.node, direction);
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.node);
                }
            }
        }
        if self.alternatives > 1 {
            let _ = writeln!(
                buffer,
                "{} equally short routes; showing the first.",
                self.alternatives
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route**: _{} → {}_ ({} hops, facing `{}`)",
            self.start, self.target, self.hops, self.orientation
        );
        for step in &self.steps {
            match &step.direction {
                Some(direction) => {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** via `{}`",
                        step.index, step.node, direction
                    );
                }
                None => {
                    let _ = writeln!(buffer, "* {:>2}. **{}**", step.index, step.node);
                }
            }
        }
        buffer
    }
}
