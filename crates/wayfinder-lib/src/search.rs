//! Free-text location search across all floors.

use serde::Serialize;

use crate::map::{HospitalMap, Location};

/// Number of results returned when callers do not ask for a specific limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A location matched by [`search_locations`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<'a> {
    pub location: &'a Location,
    pub floor_id: &'a str,
    pub floor_name: &'a str,
}

/// Case-insensitive substring search on location names and room labels.
///
/// Results follow floor order, then name within a floor. Blank queries match
/// nothing.
pub fn search_locations<'a>(
    map: &'a HospitalMap,
    query: &str,
    limit: usize,
) -> Vec<SearchResult<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut results = Vec::new();
    for floor in &map.floors {
        let mut matches: Vec<&Location> = floor
            .locations
            .iter()
            .filter(|location| matches_query(location, &needle))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        results.extend(matches.into_iter().map(|location| SearchResult {
            location,
            floor_id: &floor.id,
            floor_name: &floor.name,
        }));
        if results.len() >= limit {
            break;
        }
    }

    results.truncate(limit);
    results
}

fn matches_query(location: &Location, needle: &str) -> bool {
    location.name.to_lowercase().contains(needle)
        || location
            .room
            .as_deref()
            .is_some_and(|room| room.to_lowercase().contains(needle))
}
