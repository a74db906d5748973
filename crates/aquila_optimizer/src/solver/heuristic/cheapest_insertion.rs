use crate::problem::{
    graph::RouteGraph,
    node::{HUB, NodeIdx},
};

/// Weighted insertion cost of placing `node` between `prev` and `next`.
fn insertion_delta(
    graph: &RouteGraph,
    prev: NodeIdx,
    node: NodeIdx,
    next: NodeIdx,
    weight_distance: f64,
    weight_risk: f64,
) -> Option<(f64, bool)> {
    let incoming = graph.weight(prev, node)?;
    let outgoing = graph.weight(node, next)?;
    let replaced = graph.weight(prev, next)?;

    let delta_distance = incoming.distance + outgoing.distance - replaced.distance;
    let delta_risk = incoming.risk + outgoing.risk - replaced.risk;
    let valid = graph.is_valid_edge(prev, node) && graph.is_valid_edge(node, next);

    Some((
        weight_distance * delta_distance + weight_risk * delta_risk,
        valid,
    ))
}

/// Cheapest insertion seeded with the hub and the two nodes farthest from
/// it. Positions whose incident edges are invalid are skipped while any
/// valid slot exists; with none left, the cheapest invalid slot is taken and
/// the tour turns infeasible.
///
/// Needs at least two non-hub nodes.
pub fn construct(
    graph: &RouteGraph,
    weight_distance: f64,
    weight_risk: f64,
) -> Option<Vec<NodeIdx>> {
    let n = graph.num_nodes();
    if n < 3 {
        return None;
    }

    let distance_from_hub = |idx: NodeIdx| {
        graph
            .weight(HUB, idx)
            .map_or(0.0, |weight| weight.distance)
    };

    let first_seed = (1..n)
        .map(NodeIdx::new)
        .max_by(|&a, &b| distance_from_hub(a).total_cmp(&distance_from_hub(b)))?;
    let second_seed = (1..n)
        .map(NodeIdx::new)
        .filter(|&idx| idx != first_seed)
        .max_by(|&a, &b| distance_from_hub(a).total_cmp(&distance_from_hub(b)))?;

    let mut tour = vec![HUB, first_seed, second_seed, HUB];
    let mut remaining: Vec<NodeIdx> = (1..n)
        .map(NodeIdx::new)
        .filter(|&idx| idx != first_seed && idx != second_seed)
        .collect();

    while !remaining.is_empty() {
        let mut best_valid: Option<(f64, usize, usize)> = None;
        let mut best_any: Option<(f64, usize, usize)> = None;

        for (slot, &node) in remaining.iter().enumerate() {
            for position in 1..tour.len() {
                let Some((delta, valid)) = insertion_delta(
                    graph,
                    tour[position - 1],
                    node,
                    tour[position],
                    weight_distance,
                    weight_risk,
                ) else {
                    continue;
                };

                if best_any.is_none_or(|(best, _, _)| delta < best) {
                    best_any = Some((delta, slot, position));
                }
                if valid && best_valid.is_none_or(|(best, _, _)| delta < best) {
                    best_valid = Some((delta, slot, position));
                }
            }
        }

        let (_, slot, position) = best_valid.or(best_any)?;
        let node = remaining.remove(slot);
        tour.insert(position, node);
    }

    Some(tour)
}
