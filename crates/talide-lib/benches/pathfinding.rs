use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;
use talide_lib::{
    build_graph, compute_route, find_all_paths, find_shortest_paths, load_map, MapData, MapEdge,
    MapGraph, MapNode, RouteRequest,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/maps/warehouse.json")
}

/// Bidirectional `size` x `size` grid with compass-heading edges.
fn grid_map(size: usize) -> MapData {
    let label = |row: usize, col: usize| format!("{row}-{col}");
    let mut nodes = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let mut node = MapNode::new(label(row, col));
            let mut link = |r: usize, c: usize, direction: &str| {
                node.edges.push(MapEdge {
                    vertex: label(r, c),
                    direction: direction.into(),
                })
            };
            if row > 0 {
                link(row - 1, col, "north");
            }
            if col + 1 < size {
                link(row, col + 1, "east");
            }
            if row + 1 < size {
                link(row + 1, col, "south");
            }
            if col > 0 {
                link(row, col - 1, "west");
            }
            nodes.push(node);
        }
    }
    MapData::new(nodes)
}

static WAREHOUSE: Lazy<MapData> = Lazy::new(|| load_map(&fixture_path()).expect("fixture loads"));
static GRID_4: Lazy<MapGraph> = Lazy::new(|| build_graph(&grid_map(4)).expect("grid builds"));
static WAREHOUSE_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new("0-0", "2-2", "north"));

fn benchmark_pathfinding(c: &mut Criterion) {
    c.bench_function("compute_route_warehouse", |b| {
        let map = &*WAREHOUSE;
        let request = &*WAREHOUSE_REQUEST;
        b.iter(|| {
            let route = compute_route(map, request).expect("route exists");
            black_box(route.hop_count())
        });
    });

    c.bench_function("enumerate_grid_4x4_corners", |b| {
        let graph = &*GRID_4;
        let start = graph.index_of("0-0").expect("start present");
        let target = graph.index_of("3-3").expect("target present");
        b.iter(|| {
            let paths = find_all_paths(graph, start, target).expect("within budget");
            let candidates = find_shortest_paths(graph, &paths).expect("labels resolve");
            black_box(candidates.len())
        });
    });

    c.bench_function("build_graph_grid_10x10", |b| {
        let map = grid_map(10);
        b.iter(|| black_box(build_graph(&map).expect("grid builds").edge_count()));
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
