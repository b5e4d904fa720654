mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{load_map, resolve_map_source, HospitalMap, DEFAULT_SEARCH_LIMIT};

use commands::directory::{handle_floors, handle_locations, handle_search, handle_starts};
use commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hospital indoor wayfinding utilities")]
struct Cli {
    /// Map data file; overrides WAYFINDER_MAP and the platform data directory.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::default())]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a walking route between two locations on the same floor.
    Route(RouteCommandArgs),
    /// Summarise each floor of the loaded map.
    Floors,
    /// List locations, optionally limited to one floor.
    Locations {
        /// Floor id.
        #[arg(long)]
        floor: Option<String>,
    },
    /// Search locations by name or room label.
    Search {
        /// Text to look for.
        query: String,
        /// Maximum number of results.
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// List valid trip origins on a floor.
    Starts {
        /// Floor id.
        #[arg(long)]
        floor: String,
        /// Also report the starting point nearest to this destination.
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let map = load_hospital_map(cli.map.as_deref())?;

    match &cli.command {
        Command::Route(args) => handle_route_command(&map, args, cli.format),
        Command::Floors => handle_floors(&map, cli.format),
        Command::Locations { floor } => handle_locations(&map, floor.as_deref(), cli.format),
        Command::Search { query, limit } => handle_search(&map, query, *limit, cli.format),
        Command::Starts { floor, to } => handle_starts(&map, floor, to.as_deref(), cli.format),
    }
}

fn load_hospital_map(target: Option<&Path>) -> Result<HospitalMap> {
    let source = resolve_map_source(target).context("failed to locate hospital map data")?;
    load_map(&source).with_context(|| format!("failed to load map data from {source}"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
