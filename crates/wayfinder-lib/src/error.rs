use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Map data could not be located at the resolved path.
    #[error("map data not found at {path}")]
    MapNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for map data")]
    ProjectDirsUnavailable,

    /// Raised when map data fails structural validation.
    #[error("invalid map data in {record}: {message}")]
    InvalidMapData { record: String, message: String },

    /// Raised when a location identifier is not part of the floor or map.
    #[error("unknown location: {id}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when a floor identifier is not part of the map.
    #[error("unknown floor: {id}")]
    UnknownFloor { id: String },

    /// Raised when both endpoints exist but live on different floors.
    #[error("cross-floor routes are not supported ({from_floor} -> {to_floor})")]
    CrossFloorRoute {
        from_floor: String,
        to_floor: String,
    },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a route summary is requested for a route without locations.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_without_suggestions() {
        let error = Error::UnknownLocation {
            id: "does-not-exist".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(error.to_string(), "unknown location: does-not-exist");
    }

    #[test]
    fn unknown_location_lists_suggestions() {
        let single = Error::UnknownLocation {
            id: "pharmcy".to_string(),
            suggestions: vec!["pharmacy".to_string()],
        };
        assert!(single.to_string().ends_with(". Did you mean 'pharmacy'?"));

        let many = Error::UnknownLocation {
            id: "room".to_string(),
            suggestions: vec!["room-101".to_string(), "room-102".to_string()],
        };
        assert!(many
            .to_string()
            .contains("Did you mean one of: 'room-101', 'room-102'?"));
    }
}
