use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::graph::Graph;
use crate::map::LocationId;

/// Straight-line estimate used to guide A* towards the goal.
///
/// Both estimates are scaled by the graph's [`CostCalibration`] so they never
/// exceed the real remaining cost, which keeps A* optimal.
///
/// [`CostCalibration`]: crate::graph::CostCalibration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Manhattan => "manhattan",
        };
        f.write_str(value)
    }
}

/// Search algorithm used by the solver. Both variants return minimum-cost paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    Dijkstra,
    AStar(Heuristic),
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::AStar(Heuristic::Euclidean)
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Dijkstra => f.write_str("dijkstra"),
            SearchStrategy::AStar(heuristic) => write!(f, "a-star ({heuristic})"),
        }
    }
}

/// Find the minimum-cost path between `start` and `goal` using the default strategy.
///
/// Returns an empty vector when either id is not a node of the graph or when
/// the two nodes are not connected.
pub fn find_path(graph: &Graph, start: &str, goal: &str) -> Vec<LocationId> {
    find_path_with(graph, start, goal, SearchStrategy::default())
}

/// Find the minimum-cost path with an explicit strategy.
pub fn find_path_with(
    graph: &Graph,
    start: &str,
    goal: &str,
    strategy: SearchStrategy,
) -> Vec<LocationId> {
    let route = match strategy {
        SearchStrategy::Dijkstra => find_route_dijkstra(graph, start, goal),
        SearchStrategy::AStar(heuristic) => find_route_a_star(graph, start, goal, heuristic),
    };
    debug!(
        %strategy,
        start,
        goal,
        hops = route.as_ref().map(|path| path.len().saturating_sub(1)),
        "path search finished"
    );
    route.unwrap_or_default()
}

/// Run Dijkstra's algorithm to find the lowest-cost path.
///
/// Frontier ties are broken by ascending location id, and a node's
/// predecessor only changes on a strictly cheaper path, so results are
/// reproducible for identical input.
pub fn find_route_dijkstra(graph: &Graph, start: &str, goal: &str) -> Option<Vec<LocationId>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start.to_string()]);
    }

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            let next_cost = current_distance + edge.distance;
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost, next_cost));
            }
        }
    }

    None
}

/// Run A* search guided by a calibrated straight-line heuristic.
pub fn find_route_a_star(
    graph: &Graph,
    start: &str,
    goal: &str,
    heuristic: Heuristic,
) -> Option<Vec<LocationId>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start.to_string()]);
    }

    let mut g_score: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start, 0.0);
    let start_estimate = heuristic_distance(graph, heuristic, start, goal);
    queue.push(QueueEntry::new(start, 0.0, start_estimate));

    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(entry.node) {
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            let tentative_g = current_score + edge.distance;
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, entry.node);
                let estimate = heuristic_distance(graph, heuristic, next, goal);
                queue.push(QueueEntry::new(next, tentative_g, tentative_g + estimate));
            }
        }
    }

    None
}

/// Minimum cost from `source` to every reachable node (the source included).
pub fn shortest_distances(graph: &Graph, source: &str) -> HashMap<LocationId, f64> {
    let mut distances: HashMap<&str, f64> = HashMap::new();
    if !graph.contains(source) {
        return HashMap::new();
    }

    let mut queue = BinaryHeap::new();
    distances.insert(source, 0.0);
    queue.push(QueueEntry::new(source, 0.0, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            let next_cost = current_distance + edge.distance;
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                queue.push(QueueEntry::new(next, next_cost, next_cost));
            }
        }
    }

    distances
        .into_iter()
        .map(|(node, distance)| (node.to_string(), distance))
        .collect()
}

/// Sum of edge costs along `path`, using the cheapest edge between each pair.
///
/// Returns `None` when two consecutive locations are not adjacent.
pub fn path_cost(graph: &Graph, path: &[LocationId]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |total, pair| {
        graph
            .edge_between(&pair[0], &pair[1])
            .map(|edge| total + edge.distance)
    })
}

fn heuristic_distance(graph: &Graph, heuristic: Heuristic, from: &str, to: &str) -> f64 {
    let (Some(current), Some(goal)) = (graph.position(from), graph.position(to)) else {
        return 0.0;
    };

    let calibration = graph.calibration();
    match heuristic {
        Heuristic::Euclidean => calibration.euclidean * current.distance_to(&goal),
        Heuristic::Manhattan => calibration.manhattan * current.manhattan_to(&goal),
    }
}

fn reconstruct_path(parents: &HashMap<&str, &str>, start: &str, goal: &str) -> Vec<LocationId> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        let Some(&parent) = parents.get(current) else {
            break;
        };
        path.push(parent.to_string());
        current = parent;
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
    priority: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64, priority: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            priority: FloatOrd(priority),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority, then id.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
