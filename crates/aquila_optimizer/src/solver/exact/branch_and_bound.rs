use tracing::debug;

use crate::{
    pareto::{front::ParetoFront, objectives::Objectives, solution::Solution},
    problem::{
        battery::BatteryState,
        edge::EdgeWeight,
        graph::RouteGraph,
        node::{HUB, NodeIdx},
    },
    solver::exact::mst::prim_mst,
};

#[derive(Clone, Debug, Default)]
pub struct ExactParams {
    /// Stop exploring after this many search nodes; the front found so far
    /// is returned as-is.
    pub max_nodes: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExactStatistics {
    pub nodes_explored: usize,
    pub nodes_pruned: usize,
}

pub struct ExactResult {
    pub front: ParetoFront,
    pub statistics: ExactStatistics,
}

/// Depth-first branch-and-bound over Hamiltonian circuits from the hub.
///
/// Candidate expansions are ordered cheapest-distance-first so tight
/// incumbents show up early; subtrees whose optimistic bound is dominated by
/// a front member are cut.
pub struct BranchAndBound<'a> {
    graph: &'a RouteGraph,
    params: ExactParams,
    front: ParetoFront,
    statistics: ExactStatistics,
    visited: Vec<bool>,
    path: Vec<NodeIdx>,
    out_of_budget: bool,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(graph: &'a RouteGraph, params: ExactParams) -> Self {
        BranchAndBound {
            graph,
            params,
            front: ParetoFront::new(),
            statistics: ExactStatistics::default(),
            visited: vec![false; graph.num_nodes()],
            path: Vec::with_capacity(graph.num_nodes() + 1),
            out_of_budget: false,
        }
    }

    pub fn solve(mut self) -> ExactResult {
        if self.graph.num_nodes() == 1 {
            self.front
                .add(Solution::new(vec![HUB], Objectives::zero(), true));
            return ExactResult {
                front: self.front,
                statistics: self.statistics,
            };
        }

        self.visited[HUB.get()] = true;
        self.path.push(HUB);
        self.explore(HUB, Objectives::zero(), BatteryState::full());

        debug!(
            nodes_explored = self.statistics.nodes_explored,
            nodes_pruned = self.statistics.nodes_pruned,
            front_size = self.front.len(),
            "branch-and-bound finished"
        );

        ExactResult {
            front: self.front,
            statistics: self.statistics,
        }
    }

    fn explore(&mut self, current: NodeIdx, objectives: Objectives, battery: BatteryState) {
        if self.out_of_budget {
            return;
        }
        if self
            .params
            .max_nodes
            .is_some_and(|limit| self.statistics.nodes_explored >= limit)
        {
            self.out_of_budget = true;
            return;
        }
        self.statistics.nodes_explored += 1;

        if self.path.len() == self.graph.num_nodes() {
            self.complete(current, objectives, battery);
            return;
        }

        let bound = self.lower_bound(current, &objectives, &battery);
        if self
            .front
            .iter()
            .any(|member| member.objectives().dominates(&bound))
        {
            self.statistics.nodes_pruned += 1;
            return;
        }

        for (weight, next) in self.expansion_candidates(current) {
            let mut next_objectives = objectives;
            next_objectives.distance += weight.distance;
            next_objectives.risk += weight.risk;

            let mut next_battery = battery;
            next_battery.traverse(&weight);
            next_battery.arrive(self.graph.node(next));

            self.visited[next.get()] = true;
            self.path.push(next);
            self.explore(next, next_objectives, next_battery);
            self.path.pop();
            self.visited[next.get()] = false;

            if self.out_of_budget {
                return;
            }
        }
    }

    /// Unvisited neighbors reachable over a valid edge, cheapest distance
    /// first; equal distances keep id order.
    fn expansion_candidates(&self, current: NodeIdx) -> Vec<(EdgeWeight, NodeIdx)> {
        let mut candidates: Vec<(EdgeWeight, NodeIdx)> = (0..self.graph.num_nodes())
            .map(NodeIdx::new)
            .filter(|next| !self.visited[next.get()])
            .filter_map(|next| {
                self.graph
                    .edge(current, next)
                    .filter(|edge| edge.is_valid())
                    .map(|edge| (*edge.weight(), next))
            })
            .collect();

        candidates.sort_by(|a, b| a.0.distance.total_cmp(&b.0.distance));
        candidates
    }

    fn complete(&mut self, tail: NodeIdx, objectives: Objectives, battery: BatteryState) {
        let Some(edge) = self.graph.edge(tail, HUB) else {
            return;
        };
        if !edge.is_valid() {
            return;
        }

        let weight = *edge.weight();
        let mut battery = battery;
        battery.close(&weight);

        let mut final_objectives = objectives;
        final_objectives.distance += weight.distance;
        final_objectives.risk += weight.risk;
        final_objectives.recharges = battery.recharges();

        let mut route = self.path.clone();
        route.push(HUB);
        self.front.add(Solution::new(route, final_objectives, true));
    }

    /// Optimistic completion cost: the partial objectives plus the MST of
    /// `{current} ∪ {hub} ∪ unvisited` keyed on distance.
    fn lower_bound(
        &self,
        current: NodeIdx,
        objectives: &Objectives,
        battery: &BatteryState,
    ) -> Objectives {
        let mut members: Vec<NodeIdx> = Vec::with_capacity(self.graph.num_nodes());
        members.push(current);
        if current != HUB {
            members.push(HUB);
        }
        members.extend(
            (0..self.graph.num_nodes())
                .map(NodeIdx::new)
                .filter(|idx| !self.visited[idx.get()]),
        );

        let mst = prim_mst(self.graph, &members);

        Objectives {
            distance: objectives.distance + mst.distance,
            risk: objectives.risk + mst.risk,
            recharges: battery.recharges(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn solve(graph: &RouteGraph) -> ExactResult {
        BranchAndBound::new(graph, ExactParams::default()).solve()
    }

    /// Reference front from plain exhaustive enumeration.
    fn brute_force_front(graph: &RouteGraph) -> ParetoFront {
        fn permute(
            graph: &RouteGraph,
            remaining: &mut Vec<NodeIdx>,
            path: &mut Vec<NodeIdx>,
            front: &mut ParetoFront,
        ) {
            if remaining.is_empty() {
                let mut route = path.clone();
                route.push(HUB);
                front.add(Solution::evaluated(graph, route));
                return;
            }
            for i in 0..remaining.len() {
                let next = remaining.remove(i);
                path.push(next);
                permute(graph, remaining, path, front);
                path.pop();
                remaining.insert(i, next);
            }
        }

        let mut remaining: Vec<NodeIdx> =
            (1..graph.num_nodes()).map(NodeIdx::new).collect();
        let mut path = vec![HUB];
        let mut front = ParetoFront::new();
        permute(graph, &mut remaining, &mut path, &mut front);
        front
    }

    fn sorted_objectives(front: &ParetoFront) -> Vec<(f64, f64, u32)> {
        let mut objectives: Vec<(f64, f64, u32)> = front
            .iter()
            .map(|s| {
                (
                    s.objectives().distance,
                    s.objectives().risk,
                    s.objectives().recharges,
                )
            })
            .collect();
        objectives.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        objectives
    }

    #[test]
    fn test_square_front_is_singleton() {
        let result = solve(&test_utils::square_instance());

        assert_eq!(result.front.len(), 1);
        let best = &result.front.solutions()[0];
        assert!((best.objectives().distance - test_utils::square_tour_distance()).abs() < 1e-9);
        assert_eq!(best.objectives().risk, 0.0);
        assert_eq!(best.objectives().recharges, 0);
        assert_eq!(best.route().len(), 6);
        assert_eq!(best.route()[0], HUB);
        assert_eq!(best.route()[5], HUB);
    }

    #[test]
    fn test_matches_exhaustive_enumeration() {
        let graph = test_utils::create_graph(
            &[
                (50.0, 50.0),
                (10.0, 10.0),
                (90.0, 20.0),
                (80.0, 80.0),
                (20.0, 90.0),
                (60.0, 40.0),
            ],
            &[],
            Vec::new(),
            100.0,
        );

        let exact = solve(&graph);
        let reference = brute_force_front(&graph);

        assert_eq!(
            sorted_objectives(&exact.front),
            sorted_objectives(&reference)
        );
    }

    #[test]
    fn test_members_agree_with_route_evaluation() {
        let graph = test_utils::create_graph(
            &[
                (50.0, 50.0),
                (10.0, 10.0),
                (90.0, 20.0),
                (80.0, 80.0),
                (20.0, 90.0),
            ],
            &[],
            vec![test_utils::polygon(vec![
                (45.0, 55.0),
                (55.0, 55.0),
                (55.0, 65.0),
                (45.0, 65.0),
            ])],
            100.0,
        );

        let result = solve(&graph);
        assert!(!result.front.is_empty());

        for member in result.front.iter() {
            let (objectives, feasible) = graph.evaluate_route(member.route());
            assert!(feasible);
            assert_eq!(&objectives, member.objectives());
        }
    }

    #[test]
    fn test_single_node_instance() {
        let graph = test_utils::create_graph(&[(50.0, 50.0)], &[], Vec::new(), 100.0);
        let result = solve(&graph);

        assert_eq!(result.front.len(), 1);
        let only = &result.front.solutions()[0];
        assert_eq!(only.route(), &[HUB]);
        assert_eq!(*only.objectives(), Objectives::zero());
    }

    #[test]
    fn test_two_node_instance() {
        let graph = test_utils::delivery_line(10.0);
        let result = solve(&graph);

        assert_eq!(result.front.len(), 1);
        assert_eq!(result.front.solutions()[0].route(), &test_utils::route(&[0, 1, 0])[..]);
        assert_eq!(result.front.solutions()[0].objectives().distance, 20.0);
    }

    #[test]
    fn test_blocked_pair_has_empty_front() {
        let result = solve(&test_utils::blocked_pair_instance());
        assert!(result.front.is_empty());
    }

    #[test]
    fn test_node_budget_stops_cleanly() {
        let graph = test_utils::square_instance();
        let result = BranchAndBound::new(&graph, ExactParams { max_nodes: Some(3) }).solve();

        assert!(result.statistics.nodes_explored <= 3);
        for a in result.front.iter() {
            for b in result.front.iter() {
                if !std::ptr::eq(a, b) {
                    assert!(!a.dominates(b));
                }
            }
        }
    }

    #[test]
    fn test_pruning_happens_on_larger_instances() {
        let graph = test_utils::create_graph(
            &[
                (50.0, 50.0),
                (5.0, 5.0),
                (95.0, 5.0),
                (95.0, 95.0),
                (5.0, 95.0),
                (50.0, 5.0),
                (95.0, 50.0),
                (50.0, 95.0),
            ],
            &[],
            Vec::new(),
            100.0,
        );

        let result = solve(&graph);
        assert!(!result.front.is_empty());
        assert!(result.statistics.nodes_pruned > 0);
    }
}
