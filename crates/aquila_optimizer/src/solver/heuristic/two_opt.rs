use crate::problem::{graph::RouteGraph, node::NodeIdx};

/// A reversal must shorten the tour by more than this to be accepted.
const MIN_IMPROVEMENT: f64 = 0.01;

pub fn is_route_valid(graph: &RouteGraph, route: &[NodeIdx]) -> bool {
    route
        .windows(2)
        .all(|pair| graph.is_valid_edge(pair[0], pair[1]))
}

pub fn route_distance(graph: &RouteGraph, route: &[NodeIdx]) -> f64 {
    route
        .windows(2)
        .map(|pair| {
            graph
                .weight(pair[0], pair[1])
                .map_or(f64::INFINITY, |weight| weight.distance)
        })
        .sum()
}

/// First-improvement 2-opt over the interior of a closed tour. A reversal is
/// taken only when the whole proposed route stays valid and the distance
/// strictly improves; the search restarts after every accepted move.
pub fn polish(graph: &RouteGraph, route: &mut Vec<NodeIdx>) {
    if route.len() < 4 {
        return;
    }

    let mut current_distance = route_distance(graph, route);

    'restart: loop {
        for i in 1..route.len() - 1 {
            for j in (i + 1)..route.len() - 1 {
                let mut proposed = route.clone();
                proposed[i..=j].reverse();

                if !is_route_valid(graph, &proposed) {
                    continue;
                }

                let proposed_distance = route_distance(graph, &proposed);
                if proposed_distance < current_distance - MIN_IMPROVEMENT {
                    *route = proposed;
                    current_distance = proposed_distance;
                    continue 'restart;
                }
            }
        }

        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_route_validity() {
        let square = test_utils::square_instance();
        assert!(is_route_valid(&square, &test_utils::route(&[0, 1, 2, 3, 4, 0])));

        let blocked = test_utils::blocked_pair_instance();
        assert!(!is_route_valid(&blocked, &test_utils::route(&[0, 1, 0])));
    }

    #[test]
    fn test_polish_uncrosses_square_tour() {
        let graph = test_utils::square_instance();
        let mut route = test_utils::route(&[0, 1, 3, 2, 4, 0]);

        polish(&graph, &mut route);

        assert!(
            (route_distance(&graph, &route) - test_utils::square_tour_distance()).abs() < 1e-9
        );
        assert_eq!(route[0], NodeIdx::new(0));
        assert_eq!(route[route.len() - 1], NodeIdx::new(0));
    }

    #[test]
    fn test_polish_leaves_optimal_route_alone() {
        let graph = test_utils::square_instance();
        let mut route = test_utils::route(&[0, 1, 2, 3, 4, 0]);
        let before = route.clone();

        polish(&graph, &mut route);
        assert_eq!(route, before);
    }

    #[test]
    fn test_polish_ignores_tiny_gains() {
        // both orders differ by far less than the acceptance threshold
        let graph = test_utils::create_graph(
            &[(0.0, 0.0), (10.0, 0.001), (10.0, -0.001), (20.0, 0.0)],
            &[],
            Vec::new(),
            100.0,
        );
        let mut route = test_utils::route(&[0, 2, 1, 3, 0]);
        let before = route.clone();

        polish(&graph, &mut route);
        assert_eq!(route, before);
    }
}
