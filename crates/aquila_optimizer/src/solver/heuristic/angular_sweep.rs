use std::f64::consts::TAU;

use crate::problem::{
    graph::RouteGraph,
    node::{HUB, NodeIdx},
};

/// Order the non-hub nodes by polar angle around the hub, starting at
/// `start_angle` and sweeping in the given direction.
pub fn construct(graph: &RouteGraph, start_angle: f64, clockwise: bool) -> Vec<NodeIdx> {
    let hub_position = *graph.hub().position();

    let mut ordered: Vec<(f64, NodeIdx)> = graph
        .nodes()
        .iter()
        .filter(|node| !node.is_hub())
        .map(|node| {
            let angle = hub_position.polar_angle(node.position());
            let key = if clockwise {
                (start_angle - angle).rem_euclid(TAU)
            } else {
                (angle - start_angle).rem_euclid(TAU)
            };
            (key, node.idx())
        })
        .collect();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut route = Vec::with_capacity(graph.num_nodes() + 1);
    route.push(HUB);
    route.extend(ordered.into_iter().map(|(_, idx)| idx));
    route.push(HUB);
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_counter_clockwise_order() {
        // corner angles seen from the hub: 1 → 225°, 2 → 315°, 3 → 45°, 4 → 135°
        let graph = test_utils::square_instance();
        let route = construct(&graph, 0.0, false);
        assert_eq!(route, test_utils::route(&[0, 3, 4, 1, 2, 0]));
    }

    #[test]
    fn test_clockwise_order_reverses_the_sweep() {
        let graph = test_utils::square_instance();
        let route = construct(&graph, 0.0, true);
        assert_eq!(route, test_utils::route(&[0, 2, 1, 4, 3, 0]));
    }

    #[test]
    fn test_start_angle_rotates_the_order() {
        let graph = test_utils::square_instance();
        let route = construct(&graph, (90.0_f64).to_radians(), false);
        assert_eq!(route, test_utils::route(&[0, 4, 1, 2, 3, 0]));
    }
}
