use crate::{
    pareto::objectives::Objectives,
    problem::{graph::RouteGraph, node::NodeIdx},
};

/// A candidate circuit with its evaluated objectives. `rank` and
/// `crowding_distance` are populated by the evolutionary search only.
#[derive(Debug, Clone)]
pub struct Solution {
    route: Vec<NodeIdx>,
    objectives: Objectives,
    feasible: bool,
    pub(crate) rank: usize,
    pub(crate) crowding_distance: f64,
}

impl Solution {
    pub fn new(route: Vec<NodeIdx>, objectives: Objectives, feasible: bool) -> Self {
        Solution {
            route,
            objectives,
            feasible,
            rank: usize::MAX,
            crowding_distance: 0.0,
        }
    }

    /// Evaluate a route against the graph's cost model.
    pub fn evaluated(graph: &RouteGraph, route: Vec<NodeIdx>) -> Self {
        let (objectives, feasible) = graph.evaluate_route(&route);
        Solution::new(route, objectives, feasible)
    }

    pub fn route(&self) -> &[NodeIdx] {
        &self.route
    }

    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }

    /// Feasibility-aware dominance: an infeasible solution never dominates,
    /// and a feasible one dominates every infeasible one.
    pub fn dominates(&self, other: &Solution) -> bool {
        self.feasible && (!other.feasible || self.objectives.dominates(&other.objectives))
    }
}
