use aquila_core::{EPSILON, Point, hull::convex_hull};

use crate::problem::{
    graph::RouteGraph,
    node::{HUB, Node, NodeIdx},
};

fn node_at_position(graph: &RouteGraph, point: &Point) -> Option<NodeIdx> {
    graph
        .nodes()
        .iter()
        .find(|node| {
            (node.position().x - point.x).abs() < EPSILON
                && (node.position().y - point.y).abs() < EPSILON
        })
        .map(Node::idx)
}

/// Start from the convex hull of all node positions (rotated hub-first, hub
/// prepended when interior) and place the remaining nodes one by one at the
/// cheapest distance-delta position.
pub fn construct(graph: &RouteGraph) -> Vec<NodeIdx> {
    let points: Vec<Point> = graph
        .nodes()
        .iter()
        .map(|node| *node.position())
        .collect();

    let mut tour: Vec<NodeIdx> = convex_hull(&points)
        .iter()
        .filter_map(|point| node_at_position(graph, point))
        .collect();

    if let Some(hub_at) = tour.iter().position(|&idx| idx == HUB) {
        tour.rotate_left(hub_at);
    } else {
        tour.insert(0, HUB);
    }

    let mut route = tour;
    route.push(HUB);

    let mut placed = vec![false; graph.num_nodes()];
    for &idx in &route {
        placed[idx.get()] = true;
    }

    for node in (0..graph.num_nodes()).map(NodeIdx::new) {
        if placed[node.get()] {
            continue;
        }

        let mut best: Option<(f64, usize)> = None;
        for position in 1..route.len() {
            let prev = route[position - 1];
            let next = route[position];
            let (Some(incoming), Some(outgoing), Some(replaced)) = (
                graph.weight(prev, node),
                graph.weight(node, next),
                graph.weight(prev, next),
            ) else {
                continue;
            };

            let delta = incoming.distance + outgoing.distance - replaced.distance;
            if best.is_none_or(|(best_delta, _)| delta < best_delta) {
                best = Some((delta, position));
            }
        }

        if let Some((_, position)) = best {
            route.insert(position, node);
            placed[node.get()] = true;
        }
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_hull_tour_prepends_interior_hub() {
        let graph = test_utils::square_instance();
        let route = construct(&graph);
        assert_eq!(route, test_utils::route(&[0, 1, 2, 3, 4, 0]));
    }

    #[test]
    fn test_interior_node_inserted_at_cheapest_slot() {
        let graph = test_utils::create_graph(
            &[
                (50.0, 50.0),
                (0.0, 0.0),
                (100.0, 0.0),
                (100.0, 100.0),
                (0.0, 100.0),
                (50.0, 40.0),
            ],
            &[],
            Vec::new(),
            100.0,
        );

        let route = construct(&graph);
        assert_eq!(route, test_utils::route(&[0, 5, 1, 2, 3, 4, 0]));
    }

    #[test]
    fn test_hub_on_hull_keeps_hull_order() {
        let graph = test_utils::create_graph(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            &[],
            Vec::new(),
            100.0,
        );

        let route = construct(&graph);
        assert_eq!(route.first(), Some(&HUB));
        assert_eq!(route.last(), Some(&HUB));
        assert_eq!(route.len(), 5);
    }
}
