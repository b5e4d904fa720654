//! Route command handler for computing walking routes between locations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::debug;

use wayfinder_lib::narration::{NarrationConfig, MIN_WALKING_SPEED};
use wayfinder_lib::{
    Heuristic, HospitalMap, InMemoryRouteStore, RouteService, RouteSummary, SearchStrategy,
};

use wayfinder_cli::output::{format_route, OutputFormat};
use wayfinder_cli::terminal::ColorPalette;

/// Search algorithm selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Algorithm {
    Dijkstra,
    #[default]
    AStar,
}

/// A* heuristic selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HeuristicArg {
    #[default]
    Euclidean,
    Manhattan,
}

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Starting location id.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location id.
    #[arg(long = "to")]
    pub to: String,
    /// Floor to route on; inferred from the endpoints when omitted.
    #[arg(long)]
    pub floor: Option<String>,
    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = Algorithm::default())]
    pub algorithm: Algorithm,
    /// Heuristic used by A*.
    #[arg(long, value_enum, default_value_t = HeuristicArg::default())]
    pub heuristic: HeuristicArg,
    /// JSON file of precomputed routes that override generated ones.
    #[arg(long)]
    pub routes: Option<PathBuf>,
    /// Optimistic walking speed in map units per minute.
    #[arg(long, value_parser = parse_speed)]
    pub fast_speed: Option<f64>,
    /// Conservative walking speed in map units per minute.
    #[arg(long, value_parser = parse_speed)]
    pub slow_speed: Option<f64>,
}

fn parse_speed(raw: &str) -> std::result::Result<f64, String> {
    let speed: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if speed.is_finite() && speed >= MIN_WALKING_SPEED {
        Ok(speed)
    } else {
        Err(format!(
            "walking speed must be at least {MIN_WALKING_SPEED} map units per minute"
        ))
    }
}

impl RouteCommandArgs {
    pub fn strategy(&self) -> SearchStrategy {
        match self.algorithm {
            Algorithm::Dijkstra => SearchStrategy::Dijkstra,
            Algorithm::AStar => SearchStrategy::AStar(match self.heuristic {
                HeuristicArg::Euclidean => Heuristic::Euclidean,
                HeuristicArg::Manhattan => Heuristic::Manhattan,
            }),
        }
    }

    pub fn narration(&self) -> NarrationConfig {
        let defaults = NarrationConfig::default();
        NarrationConfig {
            fast_speed: self.fast_speed.unwrap_or(defaults.fast_speed),
            slow_speed: self.slow_speed.unwrap_or(defaults.slow_speed),
        }
    }

    fn service(&self) -> Result<RouteService> {
        let mut service = RouteService::new()
            .with_strategy(self.strategy())
            .with_narration(self.narration());
        if let Some(path) = &self.routes {
            let store = InMemoryRouteStore::from_path(path).with_context(|| {
                format!("failed to load precomputed routes from {}", path.display())
            })?;
            debug!("loaded {} precomputed routes", store.len());
            service = service.with_store(Arc::new(store));
        }
        Ok(service)
    }
}

/// Handle the route subcommand.
///
/// Curated routes are looked up before any floor is resolved, so a stored
/// route may join floors or name locations the map does not know.
pub fn handle_route_command(
    map: &HospitalMap,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let service = args.service()?;

    let summary = match service.stored_route(&args.from, &args.to)? {
        Some(route) => RouteSummary::from_map_route(map, &route)?,
        None => {
            let floor = match &args.floor {
                Some(id) => map.floor(id)?,
                None => map.route_floor(&args.from, &args.to)?,
            };
            let route = service
                .get_route(floor, &args.from, &args.to)?
                .into_result()?;
            RouteSummary::from_route(floor, &route)?
        }
    };
    print!("{}", format_route(&summary, format, ColorPalette::detect())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RouteCommandArgs {
        RouteCommandArgs {
            from: "a".to_string(),
            to: "b".to_string(),
            floor: None,
            algorithm: Algorithm::default(),
            heuristic: HeuristicArg::default(),
            routes: None,
            fast_speed: None,
            slow_speed: Some(10.0),
        }
    }

    #[test]
    fn defaults_map_to_euclidean_a_star() {
        assert_eq!(
            args().strategy(),
            SearchStrategy::AStar(Heuristic::Euclidean)
        );
    }

    #[test]
    fn dijkstra_ignores_heuristic() {
        let mut args = args();
        args.algorithm = Algorithm::Dijkstra;
        args.heuristic = HeuristicArg::Manhattan;
        assert_eq!(args.strategy(), SearchStrategy::Dijkstra);
    }

    #[test]
    fn speeds_below_minimum_are_rejected() {
        assert_eq!(parse_speed("12.5"), Ok(12.5));
        assert!(parse_speed("0").is_err());
        assert!(parse_speed("-3").is_err());
        assert!(parse_speed("1e-300").is_err());
        assert!(parse_speed("inf").is_err());
        assert!(parse_speed("fast").is_err());
    }

    #[test]
    fn speeds_override_defaults_individually() {
        let narration = args().narration();
        assert_eq!(narration.fast_speed, 40.0);
        assert_eq!(narration.slow_speed, 10.0);
    }
}
