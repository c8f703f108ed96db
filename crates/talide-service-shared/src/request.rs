//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use talide_lib::{MapData, RouteRequest as LibRouteRequest, SearchLimits};

use crate::ProblemDetails;

/// Validation trait for request types.
pub trait Validate {
    /// Validate the request, returning a boxed `ProblemDetails` (with
    /// `request_id` as its instance) when invalid.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/route`.
///
/// Exactly one of `map_id` (a loaded map) or `map` (inline map data) must be
/// present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapData>,

    pub start: String,
    pub target: String,

    /// Vehicle heading at the start; echoed back unchanged.
    pub orientation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Where a validated request takes its map from.
#[derive(Debug, Clone, Copy)]
pub enum MapSource<'a> {
    Stored(&'a str),
    Inline(&'a MapData),
}

impl RouteRequest {
    /// The map this request routes over. Call after [`Validate::validate`];
    /// an invalid combination yields `None`.
    pub fn map_source(&self) -> Option<MapSource<'_>> {
        match (&self.map_id, &self.map) {
            (Some(id), None) => Some(MapSource::Stored(id)),
            (None, Some(map)) => Some(MapSource::Inline(map)),
            _ => None,
        }
    }

    /// Convert to a library request carrying the service search limits.
    pub fn to_lib_request(&self, limits: SearchLimits) -> LibRouteRequest {
        let mut request = LibRouteRequest::new(&self.start, &self.target, &self.orientation)
            .with_limits(limits);
        if let Some(map_id) = &self.map_id {
            request = request.with_map_id(map_id.clone());
        }
        if let Some(order_id) = &self.order_id {
            request = request.with_order_id(order_id.clone());
        }
        request
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        match (&self.map_id, &self.map) {
            (Some(_), Some(_)) => {
                return Err(Box::new(ProblemDetails::bad_request(
                    "Provide either 'map_id' or 'map', not both",
                    request_id,
                )));
            }
            (None, None) => {
                return Err(Box::new(ProblemDetails::bad_request(
                    "One of 'map_id' or 'map' is required",
                    request_id,
                )));
            }
            (Some(id), None) => require("map_id", id, request_id)?,
            (None, Some(_)) => {}
        }

        require("start", &self.start, request_id)?;
        require("target", &self.target, request_id)?;
        require("orientation", &self.orientation, request_id)
    }
}

/// Query string of the legacy `GET /api/graph` endpoint.
///
/// Every field is optional at the type level so a missing parameter becomes
/// a problem response rather than an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphQuery {
    pub mapid: Option<String>,
    pub start: Option<String>,
    pub target: Option<String>,
    pub orientation: Option<String>,
    pub orderid: Option<String>,
}

impl Validate for GraphQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let required = [
            ("mapid", &self.mapid),
            ("start", &self.start),
            ("target", &self.target),
            ("orientation", &self.orientation),
        ];
        for (name, value) in required {
            match value {
                Some(value) => require(name, value, request_id)?,
                None => {
                    return Err(Box::new(ProblemDetails::bad_request(
                        format!("Missing required query parameter '{}'", name),
                        request_id,
                    )));
                }
            }
        }
        Ok(())
    }
}

impl From<GraphQuery> for RouteRequest {
    fn from(query: GraphQuery) -> Self {
        Self {
            map_id: Some(query.mapid.unwrap_or_default()),
            map: None,
            start: query.start.unwrap_or_default(),
            target: query.target.unwrap_or_default(),
            orientation: query.orientation.unwrap_or_default(),
            order_id: query.orderid.filter(|id| !id.is_empty()),
        }
    }
}

fn require(name: &str, value: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if value.trim().is_empty() {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' field is required and cannot be empty", name),
            request_id,
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use talide_lib::MapNode;

    fn stored(map_id: &str) -> RouteRequest {
        RouteRequest {
            map_id: Some(map_id.to_string()),
            map: None,
            start: "A".to_string(),
            target: "D".to_string(),
            orientation: "north".to_string(),
            order_id: None,
        }
    }

    #[test]
    fn test_route_request_valid() {
        assert!(stored("diamond").validate("test").is_ok());
    }

    #[test]
    fn test_route_request_needs_a_map() {
        let req = RouteRequest {
            map_id: None,
            ..stored("diamond")
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'map_id' or 'map'"));
    }

    #[test]
    fn test_route_request_rejects_both_maps() {
        let req = RouteRequest {
            map: Some(MapData::new(vec![MapNode::new("A")])),
            ..stored("diamond")
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("not both"));
        assert!(req.map_source().is_none());
    }

    #[test]
    fn test_route_request_blank_orientation() {
        let req = RouteRequest {
            orientation: "  ".to_string(),
            ..stored("diamond")
        };
        let err = req.validate("req-1").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'orientation'"));
        assert_eq!(err.instance.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_route_request_inline_map_deserializes() {
        let req: RouteRequest = serde_json::from_str(
            r#"{"map":[{"id":"A","edges":[{"vertex":"B","direction":"east"}]},{"id":"B","edges":[]}],
                "start":"A","target":"B","orientation":"north"}"#,
        )
        .unwrap();
        assert!(req.validate("test").is_ok());
        assert!(matches!(req.map_source(), Some(MapSource::Inline(map)) if map.node_count() == 2));
    }

    #[test]
    fn test_to_lib_request_carries_ids_and_limits() {
        let req = RouteRequest {
            order_id: Some("o-1".to_string()),
            ..stored("diamond")
        };
        let lib = req.to_lib_request(SearchLimits::unbounded());
        assert_eq!(lib.map_id.as_deref(), Some("diamond"));
        assert_eq!(lib.order_id.as_deref(), Some("o-1"));
        assert_eq!(lib.limits, SearchLimits::unbounded());
    }

    #[test]
    fn test_graph_query_missing_parameter() {
        let query = GraphQuery {
            mapid: Some("diamond".to_string()),
            start: Some("A".to_string()),
            ..GraphQuery::default()
        };
        let err = query.validate("test").unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.as_deref().unwrap().contains("'target'"));
    }

    #[test]
    fn test_graph_query_converts_to_request() {
        let query = GraphQuery {
            mapid: Some("diamond".to_string()),
            start: Some("A".to_string()),
            target: Some("D".to_string()),
            orientation: Some("east".to_string()),
            orderid: Some(String::new()),
        };
        assert!(query.validate("test").is_ok());

        let req = RouteRequest::from(query);
        assert!(matches!(req.map_source(), Some(MapSource::Stored("diamond"))));
        assert_eq!(req.orientation, "east");
        assert!(req.order_id.is_none());
    }
}
