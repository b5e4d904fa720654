use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::map::{Floor, LocationId, Position};

/// Where the cost of an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CostSource {
    /// Distance recorded on the connection.
    Explicit,
    /// Straight-line distance between the endpoints' coordinates.
    Euclidean,
}

/// Edge within the floor graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: LocationId,
    pub distance: f64,
    pub source: CostSource,
}

/// Lower bounds on cost per unit of coordinate distance across all edges.
///
/// Multiplying a straight-line (or taxicab) distance by its ratio never
/// exceeds the true remaining cost, whatever unit the explicit distances use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCalibration {
    pub euclidean: f64,
    pub manhattan: f64,
}

impl Default for CostCalibration {
    fn default() -> Self {
        Self {
            euclidean: 1.0,
            manhattan: 1.0,
        }
    }
}

impl CostCalibration {
    fn observe(&mut self, cost: f64, from: &Position, to: &Position) {
        let euclidean = from.distance_to(to);
        if euclidean > 0.0 {
            self.euclidean = self.euclidean.min(cost / euclidean);
        }
        let manhattan = from.manhattan_to(to);
        if manhattan > 0.0 {
            self.manhattan = self.manhattan.min(cost / manhattan);
        }
    }
}

/// Adjacency structure derived from one floor's locations and connections.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<LocationId, Vec<Edge>>>,
    positions: Arc<HashMap<LocationId, Position>>,
    calibration: CostCalibration,
}

impl Graph {
    /// Return the neighbours for a given location identifier.
    pub fn neighbours(&self, location: &str) -> &[Edge] {
        self.adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    /// Coordinates of a node, used by heuristic search.
    pub fn position(&self, location: &str) -> Option<Position> {
        self.positions.get(location).copied()
    }

    /// Cost-per-distance ratios observed while building the graph.
    pub fn calibration(&self) -> CostCalibration {
        self.calibration
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges (each connection contributes two).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Node identifiers in ascending order.
    pub fn nodes(&self) -> Vec<&LocationId> {
        let mut nodes: Vec<_> = self.adjacency.keys().collect();
        nodes.sort();
        nodes
    }

    /// Cheapest edge from `from` straight to `to`, if the two are adjacent.
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.target == to)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Connected components, each sorted by id, ordered by their smallest id.
    pub fn components(&self) -> Vec<Vec<LocationId>> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut components = Vec::new();

        for node in self.nodes() {
            if !visited.insert(node.as_str()) {
                continue;
            }

            let mut component = vec![node.clone()];
            let mut queue = VecDeque::from([node.as_str()]);
            while let Some(current) = queue.pop_front() {
                for edge in self.neighbours(current) {
                    if visited.insert(edge.target.as_str()) {
                        component.push(edge.target.clone());
                        queue.push_back(edge.target.as_str());
                    }
                }
            }

            component.sort();
            components.push(component);
        }

        components
    }

    /// Nodes without any traversable edge.
    pub fn isolated_nodes(&self) -> Vec<&LocationId> {
        self.nodes()
            .into_iter()
            .filter(|node| self.neighbours(node).is_empty())
            .collect()
    }
}

/// Build the routing graph for a single floor.
///
/// Every location becomes a node, including isolated ones. Each connection
/// adds a symmetric pair of directed edges; connections naming a location that
/// is not on the floor are skipped.
pub fn build_graph(floor: &Floor) -> Graph {
    let mut adjacency: HashMap<LocationId, Vec<Edge>> = HashMap::new();
    let mut positions: HashMap<LocationId, Position> = HashMap::new();

    for location in &floor.locations {
        if positions.contains_key(&location.id) {
            warn!(
                "duplicate location id {} on floor {}; keeping the first occurrence",
                location.id, floor.id
            );
            continue;
        }
        positions.insert(location.id.clone(), location.position());
        adjacency.insert(location.id.clone(), Vec::new());
    }

    let mut calibration = CostCalibration::default();
    let mut skipped = 0usize;
    for connection in &floor.connections {
        let (Some(from), Some(to)) = (
            positions.get(&connection.from),
            positions.get(&connection.to),
        ) else {
            warn!(
                "dropping connection {} -> {} on floor {}: unknown endpoint",
                connection.from, connection.to, floor.id
            );
            skipped += 1;
            continue;
        };

        if connection.from == connection.to {
            debug!("skipping self-loop connection on {}", connection.from);
            skipped += 1;
            continue;
        }

        let (distance, source) = edge_cost(connection.distance, from, to);
        calibration.observe(distance, from, to);

        if let Some(edges) = adjacency.get_mut(&connection.from) {
            edges.push(Edge {
                target: connection.to.clone(),
                distance,
                source,
            });
        }
        if let Some(edges) = adjacency.get_mut(&connection.to) {
            edges.push(Edge {
                target: connection.from.clone(),
                distance,
                source,
            });
        }
    }

    debug!(
        floor = %floor.id,
        nodes = adjacency.len(),
        connections = floor.connections.len() - skipped,
        skipped,
        "built floor graph"
    );

    Graph {
        adjacency: Arc::new(adjacency),
        positions: Arc::new(positions),
        calibration,
    }
}

fn edge_cost(explicit: Option<f64>, from: &Position, to: &Position) -> (f64, CostSource) {
    match explicit {
        Some(distance) if distance.is_finite() && distance >= 0.0 => {
            (distance, CostSource::Explicit)
        }
        Some(distance) => {
            warn!(
                "ignoring invalid connection distance {}; using straight-line distance",
                distance
            );
            (from.distance_to(to), CostSource::Euclidean)
        }
        None => (from.distance_to(to), CostSource::Euclidean),
    }
}
