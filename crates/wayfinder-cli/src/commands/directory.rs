//! Handlers for the map browsing commands: floors, locations, search and starts.

use anyhow::Result;

use wayfinder_lib::{build_graph, search_locations, starting_points, HospitalMap, RouteService};

use wayfinder_cli::output::{
    format_floors, format_locations, format_search, format_starts, FloorReport, OutputFormat,
    StartsReport,
};
use wayfinder_cli::terminal::ColorPalette;

pub fn handle_floors(map: &HospitalMap, format: OutputFormat) -> Result<()> {
    let reports: Vec<FloorReport> = map
        .floors
        .iter()
        .map(|floor| {
            let graph = build_graph(floor);
            FloorReport {
                id: floor.id.clone(),
                name: floor.name.clone(),
                locations: graph.node_count(),
                connections: graph.edge_count() / 2,
                components: graph.components().len(),
                isolated: graph.isolated_nodes().into_iter().cloned().collect(),
            }
        })
        .collect();

    if format != OutputFormat::Json {
        println!("{}", map.name);
    }
    print!(
        "{}",
        format_floors(&reports, format, ColorPalette::detect())?
    );
    Ok(())
}

pub fn handle_locations(
    map: &HospitalMap,
    floor: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let locations = match floor {
        Some(id) => map.floor(id)?.locations.iter().collect::<Vec<_>>(),
        None => map
            .floors
            .iter()
            .flat_map(|floor| floor.locations.iter())
            .collect(),
    };
    print!(
        "{}",
        format_locations(&locations, format, ColorPalette::detect())?
    );
    Ok(())
}

pub fn handle_search(
    map: &HospitalMap,
    query: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let results = search_locations(map, query, limit);
    print!(
        "{}",
        format_search(&results, format, ColorPalette::detect())?
    );
    Ok(())
}

pub fn handle_starts(
    map: &HospitalMap,
    floor: &str,
    destination: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let floor = map.floor(floor)?;
    if let Some(destination) = destination {
        if !floor.contains(destination) {
            return Err(floor.unknown_location(destination).into());
        }
    }

    let report = StartsReport {
        floor: &floor.name,
        starting_points: starting_points(floor),
        destination,
        nearest: destination
            .and_then(|destination| RouteService::new().nearest_starting_point(floor, destination)),
    };
    print!(
        "{}",
        format_starts(&report, format, ColorPalette::detect())?
    );
    Ok(())
}
