//! Route planning strategies implementing the Strategy pattern.
//!
//! The route service only talks to [`RoutePlanner`]; which search runs
//! underneath is an implementation detail selected from a [`SearchStrategy`].

use crate::graph::Graph;
use crate::map::LocationId;
use crate::path::{find_route_a_star, find_route_dijkstra, Heuristic, SearchStrategy};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The strategy identifier for this planner.
    fn strategy(&self) -> SearchStrategy;

    /// Execute the search on the given graph.
    ///
    /// Returns `Some(path)` if a route is found, `None` otherwise.
    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> Option<Vec<LocationId>>;
}

/// Dijkstra's algorithm planner.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> Option<Vec<LocationId>> {
        find_route_dijkstra(graph, start, goal)
    }
}

/// A* planner guided by a calibrated straight-line heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    heuristic: Heuristic,
}

impl AStarPlanner {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }
}

impl RoutePlanner for AStarPlanner {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::AStar(self.heuristic)
    }

    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> Option<Vec<LocationId>> {
        find_route_a_star(graph, start, goal, self.heuristic)
    }
}

/// Select the planner for a strategy.
pub fn select_planner(strategy: SearchStrategy) -> Box<dyn RoutePlanner> {
    match strategy {
        SearchStrategy::Dijkstra => Box::new(DijkstraPlanner),
        SearchStrategy::AStar(heuristic) => Box::new(AStarPlanner::new(heuristic)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dijkstra_planner_returns_correct_strategy() {
        assert_eq!(DijkstraPlanner.strategy(), SearchStrategy::Dijkstra);
    }

    #[test]
    fn astar_planner_defaults_to_euclidean() {
        let planner = AStarPlanner::default();
        assert_eq!(
            planner.strategy(),
            SearchStrategy::AStar(Heuristic::Euclidean)
        );
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        let planner = select_planner(SearchStrategy::AStar(Heuristic::Manhattan));
        assert_eq!(
            planner.strategy(),
            SearchStrategy::AStar(Heuristic::Manhattan)
        );
        let planner = select_planner(SearchStrategy::Dijkstra);
        assert_eq!(planner.strategy(), SearchStrategy::Dijkstra);
    }
}
