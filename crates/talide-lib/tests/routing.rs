mod common;

use talide_lib::{
    compute_route, compute_route_candidates, Direction, Error, MapData, RouteRenderMode,
    RouteRequest, RouteSummary, SearchLimitKind, SearchLimits,
};

use common::{fixture_map, fixtures_dir};

#[test]
fn diamond_route_picks_first_candidate() {
    let map = fixture_map("diamond");
    let request = RouteRequest::new("A", "D", "north").with_map_id("diamond");

    let route = compute_route(&map, &request).expect("route exists");
    assert_eq!(route.path, vec!["A", "B", "D"]);
    assert_eq!(
        route.directions,
        vec![Direction::from("north"), Direction::from("east")]
    );
    assert_eq!(route.orientation, "north");
    assert_eq!(route.map_id.as_deref(), Some("diamond"));
    assert_eq!(route.alternatives, 2);
}

#[test]
fn candidates_expose_every_tie() {
    let map = fixture_map("diamond");
    let request = RouteRequest::new("A", "D", "north");

    let candidates = compute_route_candidates(&map, &request).unwrap();
    let routes: Vec<_> = candidates.iter().map(|c| c.path().join(" ")).collect();
    assert_eq!(routes, vec!["A B D", "A C D"]);
}

#[test]
fn warehouse_route_is_deterministic() {
    let map = fixture_map("warehouse");
    let request = RouteRequest::new("0-0", "2-2", "east");

    let route = compute_route(&map, &request).unwrap();
    assert_eq!(route.path, vec!["0-0", "0-1", "0-2", "1-2", "2-2"]);
    assert_eq!(
        route.directions,
        ["east", "east", "south", "south"]
            .into_iter()
            .map(Direction::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(route.alternatives, 6);

    for _ in 0..5 {
        assert_eq!(compute_route(&map, &request).unwrap(), route);
    }
}

#[test]
fn orientation_is_echoed_not_interpreted() {
    let map = fixture_map("warehouse");
    let facing_north = compute_route(&map, &RouteRequest::new("0-0", "2-2", "north")).unwrap();
    let facing_west = compute_route(&map, &RouteRequest::new("0-0", "2-2", "west")).unwrap();

    assert_eq!(facing_north.path, facing_west.path);
    assert_eq!(facing_north.directions, facing_west.directions);
    assert_eq!(facing_north.orientation, "north");
    assert_eq!(facing_west.orientation, "west");
}

#[test]
fn unreachable_target_is_not_found() {
    let map = fixture_map("cycle");
    let err = compute_route(&map, &RouteRequest::new("A", "Island", "north")).unwrap_err();
    assert!(err.is_route_not_found());
    assert_eq!(err.to_string(), "no route found between A and Island");
}

#[test]
fn same_start_and_target_is_a_zero_hop_route() {
    let map = fixture_map("cycle");
    let route = compute_route(&map, &RouteRequest::new("Island", "Island", "south")).unwrap();
    assert_eq!(route.path, vec!["Island"]);
    assert!(route.directions.is_empty());
    assert!(route.arrived());
}

#[test]
fn undeclared_edge_target_is_rejected() {
    let map = fixture_map("broken");
    let err = compute_route(&map, &RouteRequest::new("A", "C", "north")).unwrap_err();
    assert!(matches!(err, Error::UnknownVertex { ref vertex } if vertex == "B"));
}

#[test]
fn unknown_start_is_distinct_from_not_found() {
    let map = fixture_map("warehouse");
    let err = compute_route(&map, &RouteRequest::new("0-9", "2-2", "north")).unwrap_err();
    assert!(!err.is_route_not_found());
    assert!(matches!(err, Error::UnknownNode { ref name, .. } if name == "0-9"));
}

#[test]
fn budget_errors_surface_from_the_facade() {
    let map = fixture_map("warehouse");
    let request = RouteRequest::new("0-0", "2-2", "north").with_limits(SearchLimits {
        max_paths: Some(3),
        ..SearchLimits::default()
    });
    let err = compute_route(&map, &request).unwrap_err();
    assert!(matches!(
        err,
        Error::SearchBudgetExceeded {
            limit: SearchLimitKind::Paths,
            value: 3
        }
    ));
}

#[test]
fn inline_json_routes_like_fixture_files() {
    let json = std::fs::read_to_string(fixtures_dir().join("diamond.json")).unwrap();
    let map = MapData::from_json_str(&json).unwrap();
    assert_eq!(map, fixture_map("diamond"));
}

#[test]
fn summary_renders_route() {
    let map = fixture_map("diamond");
    let route = compute_route(&map, &RouteRequest::new("A", "D", "east")).unwrap();
    let text = RouteSummary::from_result(&route)
        .unwrap()
        .render(RouteRenderMode::PlainText);

    assert!(text.contains("Route: A -> D (2 hops, facing east)"));
    assert!(text.contains("1: B (north)"));
    assert!(text.contains("2: D (east)"));
}
