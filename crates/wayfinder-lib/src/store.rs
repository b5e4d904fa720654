//! Precomputed route lookup.
//!
//! Curated routes override computed ones. The store is a read-only
//! collaborator; the route service only asks it for a `(from, to)` pair.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::map::LocationId;
use crate::routing::{Route, RouteSource};

/// Source of authoritative routes keyed by `(from, to)` location ids.
pub trait RouteStore: Send + Sync {
    /// Return the stored route for the pair, or `None` when nothing is stored.
    fn lookup(&self, from: &str, to: &str) -> Result<Option<Route>>;
}

/// Route store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRouteStore {
    routes: HashMap<(LocationId, LocationId), Route>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from route records. Later records replace earlier ones for the same pair.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut store = Self::new();
        for route in routes {
            store.insert(route);
        }
        store
    }

    /// Load a JSON array of route records.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let routes: Vec<Route> = serde_json::from_str(&contents)?;
        debug!(
            "loaded {} precomputed routes from {}",
            routes.len(),
            path.display()
        );
        Ok(Self::from_routes(routes.into_iter().map(|mut route| {
            route.source = RouteSource::Precomputed;
            route
        })))
    }

    pub fn insert(&mut self, route: Route) -> Option<Route> {
        let key = (route.from_location_id.clone(), route.to_location_id.clone());
        self.routes.insert(key, route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteStore for InMemoryRouteStore {
    fn lookup(&self, from: &str, to: &str) -> Result<Option<Route>> {
        Ok(self
            .routes
            .get(&(from.to_string(), to.to_string()))
            .cloned())
    }
}
