mod angular_sweep;
mod cheapest_insertion;
mod hull_insertion;
mod nearest_neighbor;
mod two_opt;

use tracing::debug;

use crate::{
    pareto::{front::ParetoFront, objectives::Objectives, solution::Solution},
    problem::{graph::RouteGraph, node::HUB, node::NodeIdx},
};

/// Weighted nearest-neighbor grid: `(w_d, w_r)` from `{0.0, 0.2, …, 1.0}`
/// with `w_d + w_r ≤ 1.0`.
const WEIGHT_GRID_STEPS: usize = 5;

/// Angular sweep start angles, every 30 degrees.
const SWEEP_ANGLE_STEPS: usize = 12;

/// Constructive portfolio with 2-opt polishing. Every construction run
/// contributes one candidate; survivors of polishing feed a single front.
pub struct HeuristicSolver<'a> {
    graph: &'a RouteGraph,
}

impl<'a> HeuristicSolver<'a> {
    pub fn new(graph: &'a RouteGraph) -> Self {
        HeuristicSolver { graph }
    }

    pub fn solve(&self) -> ParetoFront {
        let mut front = ParetoFront::new();

        if self.graph.num_nodes() == 1 {
            front.add(Solution::new(vec![HUB], Objectives::zero(), true));
            return front;
        }

        let candidates = self.construct_candidates();
        let total = candidates.len();

        for mut route in candidates {
            two_opt::polish(self.graph, &mut route);
            front.add(Solution::evaluated(self.graph, route));
        }

        debug!(
            candidates = total,
            front_size = front.len(),
            "heuristic portfolio finished"
        );

        front
    }

    fn construct_candidates(&self) -> Vec<Vec<NodeIdx>> {
        let mut candidates = Vec::new();

        for i in 0..=WEIGHT_GRID_STEPS {
            for j in 0..=(WEIGHT_GRID_STEPS - i) {
                let weight_distance = i as f64 / WEIGHT_GRID_STEPS as f64;
                let weight_risk = j as f64 / WEIGHT_GRID_STEPS as f64;
                candidates.push(nearest_neighbor::construct(
                    self.graph,
                    weight_distance,
                    weight_risk,
                ));
            }
        }

        for step in (0..=10).step_by(2) {
            let weight_distance = step as f64 / 10.0;
            let weight_risk = (10 - step) as f64 / 10.0;
            if let Some(tour) =
                cheapest_insertion::construct(self.graph, weight_distance, weight_risk)
            {
                candidates.push(tour);
            }
        }

        for step in 0..SWEEP_ANGLE_STEPS {
            let start_angle = (step as f64 * 30.0).to_radians();
            for clockwise in [false, true] {
                candidates.push(angular_sweep::construct(self.graph, start_angle, clockwise));
            }
        }

        candidates.push(hull_insertion::construct(self.graph));

        candidates
    }
}
