use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::map::{Floor, HospitalMap, Location, LocationId};
use crate::narration::{classify_step, StepKind};
use crate::routing::{Route, RouteSource};

/// Floor label for routes whose start is not on any floor of the map.
pub const UNMAPPED_FLOOR: &str = "unmapped floor";

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl RouteEndpoint {
    fn resolve(id: &str, location: Option<&Location>) -> Self {
        Self {
            id: id.to_string(),
            name: location.map(|location| location.name.clone()),
            room: location.and_then(|location| location.room.clone()),
        }
    }

    /// Location name, or the raw id when the map does not know it.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// One instruction of a summarised route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub text: String,
    /// Known only when the route carries the walked path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<StepKind>,
}

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub route_id: String,
    pub source: RouteSource,
    pub floor: String,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub distance: f64,
    pub estimated_time: String,
    pub accessibility: String,
    pub hops: usize,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with resolved location names.
    pub fn from_route(floor: &Floor, route: &Route) -> Result<Self> {
        Self::build(&floor.name, |id| floor.location(id), route)
    }

    /// Summarise a route whose endpoints are looked up across the whole map.
    ///
    /// Curated routes may start and end on different floors; the floor shown
    /// is the one holding the starting location.
    pub fn from_map_route(map: &HospitalMap, route: &Route) -> Result<Self> {
        let floor = map
            .floor_of(&route.from_location_id)
            .map(|floor| floor.name.as_str())
            .unwrap_or(UNMAPPED_FLOOR);
        Self::build(floor, |id| map.location(id), route)
    }

    fn build<'a>(
        floor: &str,
        lookup: impl Fn(&str) -> Option<&'a Location>,
        route: &Route,
    ) -> Result<Self> {
        if route.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        // Step kinds line up with the path only when each step names one location.
        let kinds: Option<Vec<StepKind>> = (route.path.len() >= 2
            && route.path.len() == route.steps.len())
        .then(|| {
            route
                .path
                .iter()
                .enumerate()
                .map(|(index, id)| {
                    lookup(id).map(|location| classify_step(index, route.path.len(), location))
                })
                .collect::<Option<Vec<_>>>()
        })
        .flatten();

        let steps = route
            .steps
            .iter()
            .enumerate()
            .map(|(index, text)| RouteStep {
                index,
                text: text.clone(),
                kind: kinds.as_ref().and_then(|kinds| kinds.get(index).copied()),
            })
            .collect();

        Ok(Self {
            route_id: route.id.clone(),
            source: route.source,
            floor: floor.to_string(),
            start: RouteEndpoint::resolve(&route.from_location_id, lookup(&route.from_location_id)),
            goal: RouteEndpoint::resolve(&route.to_location_id, lookup(&route.to_location_id)),
            distance: route.distance,
            estimated_time: route.estimated_time.clone(),
            accessibility: route.accessibility.clone(),
            hops: route.hop_count(),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} on {} ({} route)",
            self.start.display_name(),
            self.goal.display_name(),
            self.floor,
            self.source
        );
        let _ = writeln!(
            buffer,
            "Distance: {:.1}, estimated time: {}",
            self.distance, self.estimated_time
        );
        if !self.accessibility.is_empty() {
            let _ = writeln!(buffer, "Accessibility: {}", self.accessibility);
        }
        for step in &self.steps {
            let _ = writeln!(buffer, "{:>3}: {}", step.index + 1, step.text);
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ on {} (`{}`)",
            self.start.display_name(),
            self.goal.display_name(),
            self.floor,
            self.source
        );
        let _ = writeln!(
            buffer,
            "Distance **{:.1}**, estimated time **{}**",
            self.distance, self.estimated_time
        );
        for step in &self.steps {
            let marker = match step.kind {
                Some(StepKind::Elevator) => " [elevator]",
                Some(StepKind::Stairs) => " [stairs]",
                _ => "",
            };
            let _ = writeln!(buffer, "* {:>2}. {}{}", step.index + 1, step.text, marker);
        }
        buffer
    }
}
