//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use wayfinder_lib::{load_map, Connection, Floor, HospitalMap, Location, LocationKind, MapSource};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The checked-in "Riverside Clinic" map.
#[allow(dead_code)]
pub fn fixture_map() -> HospitalMap {
    load_map(&MapSource::File(fixtures_dir().join("hospital_map.json"))).expect("fixture loads")
}

/// Entrance, reception and pharmacy joined in a line, optionally with a
/// short direct corridor from the entrance to the pharmacy.
#[allow(dead_code)]
pub fn lobby_floor(direct_corridor: bool) -> Floor {
    let mut floor = Floor::new("ground-floor", "Ground Floor");
    floor.locations = vec![
        Location::new("main-entrance", "Main Entrance", 0.0, 0.0).with_kind(LocationKind::Entrance),
        Location::new("reception", "Reception", 10.0, 0.0).with_kind(LocationKind::Reception),
        Location::new("pharmacy", "Pharmacy", 10.0, 10.0)
            .with_kind(LocationKind::Pharmacy)
            .with_room("PH-001"),
    ];
    floor.connections = vec![
        Connection::with_distance("main-entrance", "reception", 10.0),
        Connection::with_distance("reception", "pharmacy", 10.0),
    ];
    if direct_corridor {
        floor
            .connections
            .push(Connection::with_distance("main-entrance", "pharmacy", 5.0));
    }
    floor
}

/// Square grid of `size` x `size` junctions spaced 10 units apart, wired to
/// their right and lower neighbours with Euclidean costs.
#[allow(dead_code)]
pub fn grid_floor(size: usize) -> Floor {
    let mut floor = Floor::new("grid", "Grid");
    for row in 0..size {
        for col in 0..size {
            floor.locations.push(Location::new(
                grid_id(row, col),
                format!("Junction {row}/{col}"),
                col as f64 * 10.0,
                row as f64 * 10.0,
            ));
            if col + 1 < size {
                floor
                    .connections
                    .push(Connection::new(grid_id(row, col), grid_id(row, col + 1)));
            }
            if row + 1 < size {
                floor
                    .connections
                    .push(Connection::new(grid_id(row, col), grid_id(row + 1, col)));
            }
        }
    }
    floor
}

#[allow(dead_code)]
pub fn grid_id(row: usize, col: usize) -> String {
    format!("n-{row:02}-{col:02}")
}
