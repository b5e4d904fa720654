use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use wayfinder_lib::{
    build_graph, find_path_with, sample_map, Connection, Floor, Graph, Heuristic, Location,
    RouteService, SearchStrategy,
};

const GRID_SIZE: usize = 30;

static SAMPLE_FLOOR: Lazy<Floor> = Lazy::new(|| {
    sample_map()
        .expect("sample map parses")
        .floor("first-floor")
        .expect("first floor present")
        .clone()
});
static SAMPLE_GRAPH: Lazy<Graph> = Lazy::new(|| build_graph(&SAMPLE_FLOOR));
static GRID_GRAPH: Lazy<Graph> = Lazy::new(|| build_graph(&grid_floor(GRID_SIZE)));

fn grid_floor(size: usize) -> Floor {
    let id = |row: usize, col: usize| format!("n-{row}-{col}");
    let mut floor = Floor::new("grid", "Synthetic Grid");
    for row in 0..size {
        for col in 0..size {
            floor.locations.push(Location::new(
                id(row, col),
                format!("Junction {row}/{col}"),
                col as f64 * 10.0,
                row as f64 * 10.0,
            ));
            if col + 1 < size {
                floor
                    .connections
                    .push(Connection::new(id(row, col), id(row, col + 1)));
            }
            if row + 1 < size {
                floor
                    .connections
                    .push(Connection::new(id(row, col), id(row + 1, col)));
            }
        }
    }
    floor
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let strategies = [
        ("dijkstra", SearchStrategy::Dijkstra),
        ("astar_euclidean", SearchStrategy::AStar(Heuristic::Euclidean)),
        ("astar_manhattan", SearchStrategy::AStar(Heuristic::Manhattan)),
    ];

    for (label, strategy) in strategies {
        c.bench_function(&format!("{label}_room101_room102"), |b| {
            let graph = &*SAMPLE_GRAPH;
            b.iter(|| black_box(find_path_with(graph, "room-101", "room-102", strategy).len()));
        });

        let goal = format!("n-{}-{}", GRID_SIZE - 1, GRID_SIZE - 1);
        c.bench_function(&format!("{label}_grid_corner_to_corner"), |b| {
            let graph = &*GRID_GRAPH;
            b.iter(|| black_box(find_path_with(graph, "n-0-0", &goal, strategy).len()));
        });
    }

    c.bench_function("route_service_room101_room102", |b| {
        let service = RouteService::new();
        let floor = &*SAMPLE_FLOOR;
        b.iter(|| {
            let outcome = service
                .get_route(floor, "room-101", "room-102")
                .expect("no store failure");
            black_box(outcome.is_found())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
