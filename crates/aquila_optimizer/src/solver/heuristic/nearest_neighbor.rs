use crate::problem::{
    graph::RouteGraph,
    node::{HUB, NodeIdx},
};

/// Greedy construction: repeatedly extend the path with the unvisited
/// neighbor minimizing `w_d · distance + w_r · risk` over valid edges, ties
/// going to the lowest id. When no valid edge leads onward the path falls
/// through to the first unvisited node and the tour turns infeasible.
pub fn construct(graph: &RouteGraph, weight_distance: f64, weight_risk: f64) -> Vec<NodeIdx> {
    let n = graph.num_nodes();
    let mut visited = vec![false; n];
    visited[HUB.get()] = true;

    let mut route = Vec::with_capacity(n + 1);
    route.push(HUB);

    for _ in 1..n {
        let current = *route.last().expect("route starts at the hub");

        let mut best: Option<(f64, NodeIdx)> = None;
        for candidate in (0..n).map(NodeIdx::new) {
            if visited[candidate.get()] {
                continue;
            }
            let Some(edge) = graph.edge(current, candidate) else {
                continue;
            };
            if !edge.is_valid() {
                continue;
            }

            let cost =
                weight_distance * edge.weight().distance + weight_risk * edge.weight().risk;
            if best.is_none_or(|(best_cost, _)| cost < best_cost) {
                best = Some((cost, candidate));
            }
        }

        let next = match best {
            Some((_, next)) => next,
            None => (0..n)
                .map(NodeIdx::new)
                .find(|idx| !visited[idx.get()])
                .expect("an unvisited node remains"),
        };

        visited[next.get()] = true;
        route.push(next);
    }

    route.push(HUB);
    route
}
