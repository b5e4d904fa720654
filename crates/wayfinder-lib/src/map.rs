use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Identifier for a location, unique across the whole building.
pub type LocationId = String;

/// Minimum Jaro-Winkler similarity for a location to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Planar coordinates of a location on its floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Calculate the Manhattan (taxicab) distance to another position.
    pub fn manhattan_to(&self, other: &Self) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Category tag attached to a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Entrance,
    Reception,
    Emergency,
    Pharmacy,
    Cafeteria,
    Elevator,
    Stairs,
    Department,
    Room,
    /// Explicitly flagged trip origin.
    Start,
    #[default]
    #[serde(other)]
    Generic,
}

impl LocationKind {
    /// Whether a trip may begin at locations of this kind.
    pub fn is_trip_origin(self) -> bool {
        matches!(
            self,
            LocationKind::Entrance
                | LocationKind::Reception
                | LocationKind::Cafeteria
                | LocationKind::Start
        )
    }

    /// Whether the location moves people between floors.
    pub fn is_vertical_transition(self) -> bool {
        matches!(self, LocationKind::Elevator | LocationKind::Stairs)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            LocationKind::Entrance => "entrance",
            LocationKind::Reception => "reception",
            LocationKind::Emergency => "emergency",
            LocationKind::Pharmacy => "pharmacy",
            LocationKind::Cafeteria => "cafeteria",
            LocationKind::Elevator => "elevator",
            LocationKind::Stairs => "stairs",
            LocationKind::Department => "department",
            LocationKind::Room => "room",
            LocationKind::Start => "start",
            LocationKind::Generic => "generic",
        };
        f.write_str(value)
    }
}

/// A named point on a floor (room, department, corridor junction, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LocationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Owning floor; filled in from the enclosing floor when a map is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,
}

impl Location {
    /// Create an untagged location.
    pub fn new(id: impl Into<String>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            kind: None,
            room: None,
            floor_id: None,
        }
    }

    /// Attach a category tag.
    pub fn with_kind(mut self, kind: LocationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Attach a room label.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    /// Category tag, treating untagged locations as generic.
    pub fn kind(&self) -> LocationKind {
        self.kind.unwrap_or_default()
    }

    /// Room label shown to visitors.
    pub fn room_label(&self) -> &str {
        self.room.as_deref().unwrap_or("Room not specified")
    }
}

/// Traversable corridor segment between two locations on the same floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: LocationId,
    pub to: LocationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Connection {
    /// Connection whose cost is derived from the endpoints' coordinates.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance: None,
        }
    }

    /// Connection with an explicit cost.
    pub fn with_distance(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance: Some(distance),
        }
    }
}

/// One floor of the building and the corridors between its locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Floor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            locations: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Lookup a location by identifier. The first occurrence wins when ids repeat.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.location(id).is_some()
    }

    /// Suggest location ids that resemble `query`, best match first.
    pub fn fuzzy_location_matches(&self, query: &str, limit: usize) -> Vec<String> {
        fuzzy_matches(self.locations.iter(), query, limit)
    }

    /// Build the error reported when `id` is not a location on this floor.
    pub fn unknown_location(&self, id: &str) -> Error {
        Error::UnknownLocation {
            id: id.to_string(),
            suggestions: self.fuzzy_location_matches(id, 3),
        }
    }
}

/// Full building map as supplied by the map-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalMap {
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl HospitalMap {
    /// Lookup a floor by identifier.
    pub fn floor(&self, id: &str) -> Result<&Floor> {
        self.floors
            .iter()
            .find(|floor| floor.id == id)
            .ok_or_else(|| Error::UnknownFloor { id: id.to_string() })
    }

    /// Floor that owns the given location.
    pub fn floor_of(&self, location_id: &str) -> Option<&Floor> {
        self.floors
            .iter()
            .find(|floor| floor.contains(location_id))
    }

    /// Lookup a location anywhere in the building.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.floors.iter().find_map(|floor| floor.location(id))
    }

    /// Resolve the single floor on which a trip between `from` and `to` can be planned.
    pub fn route_floor(&self, from: &str, to: &str) -> Result<&Floor> {
        let from_floor = self
            .floor_of(from)
            .ok_or_else(|| self.unknown_location(from))?;
        let to_floor = self.floor_of(to).ok_or_else(|| self.unknown_location(to))?;

        if from_floor.id != to_floor.id {
            return Err(Error::CrossFloorRoute {
                from_floor: from_floor.id.clone(),
                to_floor: to_floor.id.clone(),
            });
        }

        Ok(from_floor)
    }

    /// Suggest location ids from any floor that resemble `query`.
    pub fn fuzzy_location_matches(&self, query: &str, limit: usize) -> Vec<String> {
        fuzzy_matches(
            self.floors.iter().flat_map(|floor| floor.locations.iter()),
            query,
            limit,
        )
    }

    fn unknown_location(&self, id: &str) -> Error {
        Error::UnknownLocation {
            id: id.to_string(),
            suggestions: self.fuzzy_location_matches(id, 3),
        }
    }

    /// Copy each floor's identifier into its locations' `floor_id` field.
    pub fn assign_floor_ids(&mut self) {
        for floor in &mut self.floors {
            for location in &mut floor.locations {
                match &location.floor_id {
                    Some(existing) if existing != &floor.id => {
                        warn!(
                            "location {} declares floor {} but is listed under {}; using {}",
                            location.id, existing, floor.id, floor.id
                        );
                        location.floor_id = Some(floor.id.clone());
                    }
                    Some(_) => {}
                    None => location.floor_id = Some(floor.id.clone()),
                }
            }
        }
    }

    /// Check the structural rules every map must satisfy before routing.
    ///
    /// Connections to unknown locations are accepted here; the graph builder
    /// drops them.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("map", "name must not be empty"));
        }

        for (floor_index, floor) in self.floors.iter().enumerate() {
            if floor.id.trim().is_empty() {
                return Err(invalid(
                    format!("floor #{floor_index}"),
                    "id must not be empty",
                ));
            }
            if floor.name.trim().is_empty() {
                return Err(invalid(
                    format!("floor '{}'", floor.id),
                    "name must not be empty",
                ));
            }
            validate_floor(floor)?;
        }

        Ok(())
    }
}

fn validate_floor(floor: &Floor) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, location) in floor.locations.iter().enumerate() {
        let record = format!("floor '{}' location #{index}", floor.id);
        if location.id.trim().is_empty() {
            return Err(invalid(record, "id must not be empty"));
        }
        if location.name.trim().is_empty() {
            return Err(invalid(
                format!("{record} ('{}')", location.id),
                "name must not be empty",
            ));
        }
        if !location.x.is_finite() || !location.y.is_finite() {
            return Err(invalid(
                format!("{record} ('{}')", location.id),
                "coordinates must be finite numbers",
            ));
        }
        if !seen.insert(location.id.as_str()) {
            warn!(
                "duplicate location id {} on floor {}; the first occurrence is used",
                location.id, floor.id
            );
        }
    }

    for (index, connection) in floor.connections.iter().enumerate() {
        let record = format!("floor '{}' connection #{index}", floor.id);
        if connection.from.trim().is_empty() || connection.to.trim().is_empty() {
            return Err(invalid(record, "both endpoints are required"));
        }
        if let Some(distance) = connection.distance {
            if !distance.is_finite() || distance < 0.0 {
                return Err(invalid(
                    format!("{record} ({} -> {})", connection.from, connection.to),
                    "distance must be a finite, non-negative number",
                ));
            }
        }
    }

    Ok(())
}

fn invalid(record: impl Into<String>, message: impl Into<String>) -> Error {
    Error::InvalidMapData {
        record: record.into(),
        message: message.into(),
    }
}

fn fuzzy_matches<'a>(
    locations: impl Iterator<Item = &'a Location>,
    query: &str,
    limit: usize,
) -> Vec<String> {
    let needle = query.to_lowercase();
    let mut scored: Vec<(f64, &str)> = Vec::new();

    for location in locations {
        let id_score = strsim::jaro_winkler(&needle, &location.id.to_lowercase());
        let name_score = strsim::jaro_winkler(&needle, &location.name.to_lowercase());
        let score = id_score.max(name_score);
        if score < SUGGESTION_THRESHOLD {
            continue;
        }
        if scored.iter().any(|(_, id)| *id == location.id) {
            continue;
        }
        scored.push((score, location.id.as_str()));
    }

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });
    scored
        .into_iter()
        .take(limit)
        .map(|(_, id)| id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Floor {
        let mut floor = Floor::new("ground-floor", "Ground Floor");
        floor.locations = vec![
            Location::new("main-entrance", "Main Entrance", 0.0, 0.0)
                .with_kind(LocationKind::Entrance),
            Location::new("pharmacy", "Pharmacy", 10.0, 10.0)
                .with_kind(LocationKind::Pharmacy)
                .with_room("PH-001"),
        ];
        floor.connections = vec![Connection::with_distance("main-entrance", "pharmacy", 5.0)];
        floor
    }

    #[test]
    fn distances_between_positions() {
        let a = Position { x: 0.0, y: 0.0 };
        let b = Position { x: 3.0, y: 4.0 };
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.manhattan_to(&b), 7.0);
    }

    #[test]
    fn unknown_kind_tags_become_generic() {
        let location: Location =
            serde_json::from_str(r#"{"id":"gift","name":"Gift Shop","x":1,"y":2,"type":"shop"}"#)
                .expect("location parses");
        assert_eq!(location.kind(), LocationKind::Generic);

        let untagged: Location =
            serde_json::from_str(r#"{"id":"hall","name":"Hall","x":1,"y":2}"#).expect("parses");
        assert_eq!(untagged.kind, None);
        assert_eq!(untagged.room_label(), "Room not specified");
    }

    #[test]
    fn trip_origin_kinds() {
        assert!(LocationKind::Entrance.is_trip_origin());
        assert!(LocationKind::Start.is_trip_origin());
        assert!(!LocationKind::Pharmacy.is_trip_origin());
        assert!(LocationKind::Stairs.is_vertical_transition());
    }

    #[test]
    fn validation_names_the_failing_record() {
        let mut map = HospitalMap {
            name: "General Hospital".to_string(),
            floors: vec![floor()],
        };
        assert!(map.validate().is_ok());

        map.floors[0].locations[1].x = f64::NAN;
        let error = map.validate().expect_err("nan coordinate rejected");
        let message = error.to_string();
        assert!(message.contains("floor 'ground-floor' location #1"), "{message}");
        assert!(message.contains("pharmacy"), "{message}");
    }

    #[test]
    fn validation_rejects_negative_distance() {
        let mut map = HospitalMap {
            name: "General Hospital".to_string(),
            floors: vec![floor()],
        };
        map.floors[0].connections[0].distance = Some(-1.0);
        let error = map.validate().expect_err("negative distance rejected");
        assert!(error.to_string().contains("connection #0"));
    }

    #[test]
    fn fuzzy_matches_suggest_close_ids() {
        let floor = floor();
        let matches = floor.fuzzy_location_matches("pharmcy", 3);
        assert_eq!(matches, vec!["pharmacy".to_string()]);
        assert!(floor.fuzzy_location_matches("zzzzzz", 3).is_empty());
    }

    #[test]
    fn route_floor_rejects_cross_floor_trips() {
        let mut upper = Floor::new("first-floor", "First Floor");
        upper
            .locations
            .push(Location::new("neurology", "Neurology", 0.0, 0.0));
        let map = HospitalMap {
            name: "General Hospital".to_string(),
            floors: vec![floor(), upper],
        };

        assert_eq!(
            map.route_floor("main-entrance", "pharmacy")
                .expect("same floor")
                .id,
            "ground-floor"
        );
        assert!(matches!(
            map.route_floor("main-entrance", "neurology"),
            Err(Error::CrossFloorRoute { .. })
        ));
        assert!(matches!(
            map.route_floor("main-entrance", "does-not-exist"),
            Err(Error::UnknownLocation { .. })
        ));
    }
}
