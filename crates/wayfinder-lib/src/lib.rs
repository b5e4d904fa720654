//! Hospital wayfinding library entry points.
//!
//! This crate exposes helpers to locate and load hospital map data, build
//! per-floor corridor graphs, run shortest-path searches and narrate the
//! resulting routes. Higher-level consumers (the CLI, kiosk front-ends)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod graph;
pub mod map;
pub mod narration;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;
pub mod session;
pub mod store;

pub use dataset::{
    default_map_path, load_map, parse_map, resolve_map_source, sample_map, MapSource,
};
pub use error::{Error, Result};
pub use graph::{build_graph, Graph};
pub use map::{Connection, Floor, HospitalMap, Location, LocationId, LocationKind, Position};
pub use narration::{narrate, narrate_on_graph, EstimatedTime, Narration, NarrationConfig};
pub use output::{RouteRenderMode, RouteSummary};
pub use path::{find_path, find_path_with, Heuristic, SearchStrategy};
pub use routing::{
    nearest_starting_point, starting_points, NotFound, Route, RouteOutcome, RouteService,
    RouteSource,
};
pub use search::{search_locations, SearchResult, DEFAULT_SEARCH_LIMIT};
pub use session::NavigationSession;
pub use store::{InMemoryRouteStore, RouteStore};
