mod common;

use wayfinder_lib::graph::CostSource;
use wayfinder_lib::{build_graph, Connection, Floor, Location};

use common::{fixture_map, lobby_floor};

#[test]
fn every_location_is_a_node_including_isolated_ones() {
    let map = fixture_map();
    let lobby = map.floor("lobby").expect("lobby exists");
    let graph = build_graph(lobby);

    assert_eq!(graph.node_count(), 4);
    assert!(graph.contains("storage"));
    assert!(graph.neighbours("storage").is_empty());
    assert_eq!(
        graph
            .isolated_nodes()
            .into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        vec!["storage"]
    );
}

#[test]
fn connections_to_unknown_locations_are_dropped() {
    let map = fixture_map();
    let graph = build_graph(map.floor("lobby").expect("lobby exists"));

    assert!(!graph.contains("loading-dock"));
    assert!(graph
        .neighbours("pharmacy")
        .iter()
        .all(|edge| edge.target != "loading-dock"));
    // Two valid connections, each stored in both directions.
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn edges_are_symmetric_with_equal_costs() {
    let graph = build_graph(&lobby_floor(true));
    for node in graph.nodes() {
        for edge in graph.neighbours(node) {
            let back = graph
                .edge_between(&edge.target, node)
                .expect("reverse edge present");
            assert_eq!(back.distance, edge.distance);
        }
    }
}

#[test]
fn missing_distances_use_straight_line_costs() {
    let map = fixture_map();
    let graph = build_graph(map.floor("ward").expect("ward exists"));

    let edge = graph
        .edge_between("elevator-w", "corridor")
        .expect("edge present");
    assert_eq!(edge.distance, 10.0);
    assert_eq!(edge.source, CostSource::Euclidean);

    let explicit = graph
        .edge_between("corridor", "ward-a")
        .expect("edge present");
    assert_eq!(explicit.source, CostSource::Explicit);
}

#[test]
fn components_report_disconnected_parts() {
    let map = fixture_map();
    let graph = build_graph(map.floor("lobby").expect("lobby exists"));

    let components = graph.components();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0], vec!["main-entrance", "pharmacy", "reception"]);
    assert_eq!(components[1], vec!["storage"]);
}

#[test]
fn empty_floor_builds_empty_graph() {
    let graph = build_graph(&Floor::new("empty", "Empty"));
    assert!(graph.is_empty());
    assert!(graph.components().is_empty());
}

#[test]
fn duplicate_ids_keep_first_position() {
    let mut floor = Floor::new("f", "F");
    floor.locations = vec![
        Location::new("a", "A", 0.0, 0.0),
        Location::new("b", "B", 3.0, 4.0),
        Location::new("a", "A again", 100.0, 100.0),
    ];
    floor.connections = vec![Connection::new("a", "b")];

    let graph = build_graph(&floor);
    assert_eq!(graph.node_count(), 2);
    let edge = graph.edge_between("a", "b").expect("edge present");
    assert_eq!(edge.distance, 5.0);
}
