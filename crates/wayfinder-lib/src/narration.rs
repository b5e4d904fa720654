//! Turn an ordered path of locations into visitor-facing instructions.
//!
//! The baseline wording is fixed: "Start at …", "Continue to …" and
//! "Arrive at … (room)". Each step additionally carries a [`StepKind`] so a
//! presentation layer can style elevator and stairs legs without reparsing
//! the text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::map::{Location, LocationId, LocationKind};

/// Walking speed used for the optimistic end of the time estimate (units per minute).
pub const DEFAULT_FAST_SPEED: f64 = 40.0;
/// Walking speed used for the conservative end of the time estimate (units per minute).
pub const DEFAULT_SLOW_SPEED: f64 = 25.0;

/// Slowest walking speed, in map units per minute, that callers should accept.
pub const MIN_WALKING_SPEED: f64 = 0.1;

/// Walking speeds used to derive the estimated time range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrationConfig {
    pub fast_speed: f64,
    pub slow_speed: f64,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            fast_speed: DEFAULT_FAST_SPEED,
            slow_speed: DEFAULT_SLOW_SPEED,
        }
    }
}

impl NarrationConfig {
    /// Estimate how long walking `distance` takes, in whole minutes rounded up.
    pub fn estimate(&self, distance: f64) -> EstimatedTime {
        let (fast, slow) = if self.fast_speed >= self.slow_speed {
            (self.fast_speed, self.slow_speed)
        } else {
            (self.slow_speed, self.fast_speed)
        };
        EstimatedTime {
            low_minutes: minutes(distance, fast),
            high_minutes: minutes(distance, slow),
        }
    }
}

fn minutes(distance: f64, speed: f64) -> u32 {
    if distance <= 0.0 || !distance.is_finite() || speed <= 0.0 || !speed.is_finite() {
        return 0;
    }
    // Saturates at u32::MAX for absurd inputs.
    (distance / speed).ceil() as u32
}

/// Range of expected walking minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EstimatedTime {
    pub low_minutes: u32,
    pub high_minutes: u32,
}

impl fmt::Display for EstimatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} minutes", self.low_minutes, self.high_minutes)
    }
}

/// Classification of a narration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Start,
    Continue,
    Elevator,
    Stairs,
    Arrive,
    /// Path was empty; nothing to walk.
    NoRoute,
    /// Start and destination are the same location.
    AlreadyThere,
}

/// One instruction within a narration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrationStep {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    pub kind: StepKind,
    pub text: String,
    /// Distance walked from the previous step to reach this one.
    pub leg_distance: f64,
}

/// Instructions and aggregate metrics for a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narration {
    pub steps: Vec<NarrationStep>,
    pub distance: f64,
    pub estimated_time: EstimatedTime,
}

impl Narration {
    /// Plain instruction strings in path order.
    pub fn instructions(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.text.clone()).collect()
    }
}

/// Narrate a path using straight-line leg lengths and default walking speeds.
pub fn narrate(path: &[&Location]) -> Narration {
    narrate_with(
        path,
        |from, to| from.position().distance_to(&to.position()),
        &NarrationConfig::default(),
    )
}

/// Narrate a path whose leg lengths are the graph's edge costs.
///
/// Legs without a direct edge fall back to the straight-line distance.
pub fn narrate_on_graph(graph: &Graph, path: &[&Location], config: &NarrationConfig) -> Narration {
    narrate_with(
        path,
        |from, to| {
            graph
                .edge_between(&from.id, &to.id)
                .map(|edge| edge.distance)
                .unwrap_or_else(|| from.position().distance_to(&to.position()))
        },
        config,
    )
}

fn narrate_with<F>(path: &[&Location], leg: F, config: &NarrationConfig) -> Narration
where
    F: Fn(&Location, &Location) -> f64,
{
    let steps = match path {
        [] => vec![NarrationStep {
            index: 0,
            location_id: None,
            kind: StepKind::NoRoute,
            text: "No route found".to_string(),
            leg_distance: 0.0,
        }],
        [only] => vec![NarrationStep {
            index: 0,
            location_id: Some(only.id.clone()),
            kind: StepKind::AlreadyThere,
            text: format!("You are already at {} ({})", only.name, only.room_label()),
            leg_distance: 0.0,
        }],
        _ => path
            .iter()
            .enumerate()
            .map(|(index, location)| {
                let leg_distance = if index == 0 {
                    0.0
                } else {
                    leg(path[index - 1], *location)
                };
                let kind = classify_step(index, path.len(), location);
                let text = match kind {
                    StepKind::Start => format!("Start at {}", location.name),
                    StepKind::Arrive => {
                        format!("Arrive at {} ({})", location.name, location.room_label())
                    }
                    _ => format!("Continue to {}", location.name),
                };
                NarrationStep {
                    index,
                    location_id: Some(location.id.clone()),
                    kind,
                    text,
                    leg_distance,
                }
            })
            .collect(),
    };

    let distance = steps.iter().map(|step| step.leg_distance).sum();
    Narration {
        steps,
        distance,
        estimated_time: config.estimate(distance),
    }
}

/// Classify the step at `index` of a path of `len` locations (`len >= 2`).
pub fn classify_step(index: usize, len: usize, location: &Location) -> StepKind {
    if index == 0 {
        return StepKind::Start;
    }
    if index + 1 >= len {
        return StepKind::Arrive;
    }
    match location.kind() {
        LocationKind::Elevator => StepKind::Elevator,
        LocationKind::Stairs => StepKind::Stairs,
        _ => StepKind::Continue,
    }
}
