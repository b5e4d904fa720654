//! Route service for indoor wayfinding.
//!
//! This module provides:
//! - [`Route`] - Uniform route record, precomputed or generated
//! - [`RouteOutcome`] - Found route or a recoverable [`NotFound`] reason
//! - [`RouteService`] - Store lookup, then graph build, search and narration
//! - [`starting_points`] / [`nearest_starting_point`] - Trip origin policy
//!
//! # Example
//!
//! ```ignore
//! use wayfinder_lib::{sample_map, RouteService};
//!
//! let map = sample_map()?;
//! let floor = map.floor("ground-floor")?;
//! let route = RouteService::new()
//!     .get_route(floor, "main-entrance", "pharmacy")?
//!     .into_result()?;
//! println!("{} ({})", route.distance, route.estimated_time);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{build_graph, Graph};
use crate::map::{Floor, Location, LocationId};
use crate::narration::{narrate_on_graph, NarrationConfig};
use crate::path::{shortest_distances, SearchStrategy};
use crate::session::NavigationSession;
use crate::store::RouteStore;

/// Identifier given to routes computed on demand.
pub const GENERATED_ROUTE_ID: &str = "generated";

/// Accessibility note attached to computed routes.
pub const DEFAULT_ACCESSIBILITY: &str = "Check individual locations";

/// Where a route came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    #[default]
    Precomputed,
    Generated,
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteSource::Precomputed => "precomputed",
            RouteSource::Generated => "generated",
        };
        f.write_str(value)
    }
}

/// Route between two locations, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub from_location_id: LocationId,
    pub to_location_id: LocationId,
    pub distance: f64,
    pub estimated_time: String,
    #[serde(default)]
    pub accessibility: String,
    #[serde(default)]
    pub steps: Vec<String>,
    /// Location ids walked in order; empty for curated routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<LocationId>,
    #[serde(default)]
    pub source: RouteSource,
}

impl Route {
    /// Number of corridor segments walked.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Why no route was returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// An endpoint is not a location on the floor.
    UnknownLocation { id: String, suggestions: Vec<String> },
    /// Both endpoints exist but no corridor sequence joins them.
    NoPath { from: String, to: String },
}

impl From<NotFound> for Error {
    fn from(reason: NotFound) -> Self {
        match reason {
            NotFound::UnknownLocation { id, suggestions } => {
                Error::UnknownLocation { id, suggestions }
            }
            NotFound::NoPath { from, to } => Error::RouteNotFound {
                start: from,
                goal: to,
            },
        }
    }
}

/// Result of a route request.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(Route),
    NotFound(NotFound),
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    /// Convert into the library error taxonomy for `?` propagation.
    pub fn into_result(self) -> Result<Route> {
        match self {
            RouteOutcome::Found(route) => Ok(route),
            RouteOutcome::NotFound(reason) => Err(reason.into()),
        }
    }
}

/// Orchestrates precomputed lookup, path search and narration.
#[derive(Clone, Default)]
pub struct RouteService {
    store: Option<Arc<dyn RouteStore>>,
    strategy: SearchStrategy,
    narration: NarrationConfig,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService")
            .field("store", &self.store.is_some())
            .field("strategy", &self.strategy)
            .field("narration", &self.narration)
            .finish()
    }
}

impl RouteService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `store` before computing routes.
    pub fn with_store(mut self, store: Arc<dyn RouteStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_narration(mut self, narration: NarrationConfig) -> Self {
        self.narration = narration;
        self
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn narration(&self) -> &NarrationConfig {
        &self.narration
    }

    /// Curated route for the pair, if a store is attached and holds one.
    ///
    /// Stored routes are not tied to a floor, so callers can consult this
    /// before deciding where to plan.
    pub fn stored_route(&self, from: &str, to: &str) -> Result<Option<Route>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let route = store.lookup(from, to)?;
        if let Some(route) = &route {
            debug!("using precomputed route {} for {} -> {}", route.id, from, to);
        }
        Ok(route)
    }

    /// Compute the route between two locations on one floor.
    ///
    /// A stored route for the pair is returned verbatim. Otherwise the floor
    /// graph is built and searched; unknown endpoints and unreachable
    /// destinations come back as [`RouteOutcome::NotFound`]. `Err` is only
    /// returned when the route store fails.
    pub fn get_route(&self, floor: &Floor, from: &str, to: &str) -> Result<RouteOutcome> {
        if let Some(route) = self.stored_route(from, to)? {
            return Ok(RouteOutcome::Found(route));
        }

        for id in [from, to] {
            if !floor.contains(id) {
                return Ok(RouteOutcome::NotFound(NotFound::UnknownLocation {
                    id: id.to_string(),
                    suggestions: floor.fuzzy_location_matches(id, 3),
                }));
            }
        }

        let graph = build_graph(floor);
        let planner = select_planner(self.strategy);
        let Some(path) = planner.find_path(&graph, from, to) else {
            debug!("no path between {} and {} on floor {}", from, to, floor.id);
            return Ok(RouteOutcome::NotFound(NotFound::NoPath {
                from: from.to_string(),
                to: to.to_string(),
            }));
        };

        Ok(RouteOutcome::Found(self.compose_route(&graph, floor, from, to, path)))
    }

    /// Route between the session's selected endpoints, recording it as the active route.
    ///
    /// Returns `None` when the session does not have both endpoints selected.
    pub fn route_session(
        &self,
        session: &mut NavigationSession,
        floor: &Floor,
    ) -> Result<Option<RouteOutcome>> {
        let Some((from, to)) = session.endpoints() else {
            return Ok(None);
        };
        let (from, to) = (from.to_string(), to.to_string());

        let outcome = self.get_route(floor, &from, &to)?;
        match &outcome {
            RouteOutcome::Found(route) => session.set_active_route(route.clone()),
            RouteOutcome::NotFound(_) => session.clear_active_route(),
        }
        Ok(Some(outcome))
    }

    /// Closest valid trip origin to `destination` on the floor.
    pub fn nearest_starting_point<'a>(
        &self,
        floor: &'a Floor,
        destination: &str,
    ) -> Option<&'a Location> {
        nearest_starting_point(floor, &build_graph(floor), destination)
    }

    fn compose_route(
        &self,
        graph: &Graph,
        floor: &Floor,
        from: &str,
        to: &str,
        path: Vec<LocationId>,
    ) -> Route {
        let locations: Vec<&Location> = path.iter().filter_map(|id| floor.location(id)).collect();
        let narration = narrate_on_graph(graph, &locations, &self.narration);

        Route {
            id: GENERATED_ROUTE_ID.to_string(),
            from_location_id: from.to_string(),
            to_location_id: to.to_string(),
            distance: narration.distance,
            estimated_time: narration.estimated_time.to_string(),
            accessibility: DEFAULT_ACCESSIBILITY.to_string(),
            steps: narration.instructions(),
            path,
            source: RouteSource::Generated,
        }
    }
}

/// Locations on the floor where a trip may begin, sorted by id.
///
/// Entrances, reception desks, cafeterias and locations tagged `start`
/// qualify. Repeated ids are reported once.
pub fn starting_points(floor: &Floor) -> Vec<&Location> {
    let mut points: Vec<&Location> = Vec::new();
    for location in &floor.locations {
        if location.kind().is_trip_origin() && !points.iter().any(|p| p.id == location.id) {
            points.push(location);
        }
    }
    points.sort_by(|a, b| a.id.cmp(&b.id));
    points
}

/// Reachable starting point with the lowest path cost to `destination`.
///
/// The destination itself is never proposed. Equal costs resolve to the
/// smallest id.
pub fn nearest_starting_point<'a>(
    floor: &'a Floor,
    graph: &Graph,
    destination: &str,
) -> Option<&'a Location> {
    // Corridors are symmetric, so distances from the destination equal distances to it.
    let distances = shortest_distances(graph, destination);

    starting_points(floor)
        .into_iter()
        .filter(|location| location.id != destination)
        .filter_map(|location| {
            distances
                .get(&location.id)
                .map(|distance| (*distance, location))
        })
        .min_by(|(a_cost, a), (b_cost, b)| a_cost.total_cmp(b_cost).then_with(|| a.id.cmp(&b.id)))
        .map(|(_, location)| location)
}
