use aquila_core::{Point, Polygon};

use crate::problem::{
    graph::{RouteGraph, RouteGraphBuilder},
    node::{Node, NodeIdx},
};

pub fn route(ids: &[usize]) -> Vec<NodeIdx> {
    ids.iter().map(|&id| NodeIdx::new(id)).collect()
}

pub fn create_nodes(positions: &[(f64, f64)], charging: &[usize]) -> Vec<Node> {
    positions
        .iter()
        .enumerate()
        .map(|(index, &(x, y))| {
            let idx = NodeIdx::new(index);
            let position = Point::new(x, y);
            if index == 0 {
                Node::hub(position)
            } else if charging.contains(&index) {
                Node::charging(idx, position)
            } else {
                Node::delivery(idx, position)
            }
        })
        .collect()
}

pub fn create_graph(
    positions: &[(f64, f64)],
    charging: &[usize],
    zones: Vec<Polygon>,
    map_size: f64,
) -> RouteGraph {
    let mut builder = RouteGraphBuilder::default();
    builder.set_nodes(create_nodes(positions, charging));
    builder.set_no_fly_zones(zones);
    builder.set_map_size(map_size);
    builder.build()
}

pub fn polygon(vertices: Vec<(f64, f64)>) -> Polygon {
    Polygon::new(vertices.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

/// Hub at the center of a 100-map, deliveries on the four corners, no zones.
pub fn square_instance() -> RouteGraph {
    create_graph(
        &[
            (50.0, 50.0),
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
        ],
        &[],
        Vec::new(),
        100.0,
    )
}

/// Circuit distance of the corner tour `[0, 1, 2, 3, 4, 0]` of
/// [`square_instance`]: three sides plus two half-diagonals.
pub fn square_tour_distance() -> f64 {
    300.0 + 100.0 * std::f64::consts::SQRT_2
}

/// Two nodes separated by a no-fly square: no Hamiltonian circuit exists.
pub fn blocked_pair_instance() -> RouteGraph {
    create_graph(
        &[(20.0, 50.0), (80.0, 50.0)],
        &[],
        vec![polygon(vec![
            (40.0, 40.0),
            (60.0, 40.0),
            (60.0, 60.0),
            (40.0, 60.0),
        ])],
        100.0,
    )
}

pub fn graph_with_zone(positions: Vec<(f64, f64)>, zone: Vec<(f64, f64)>) -> RouteGraph {
    create_graph(&positions, &[], vec![polygon(zone)], 100.0)
}

/// Nodes along the x axis at the given abscissae, hub first, no zones.
pub fn open_field_line(xs: &[f64]) -> RouteGraph {
    let positions: Vec<(f64, f64)> = xs.iter().map(|&x| (x, 0.0)).collect();
    let map_size = xs.iter().fold(1.0_f64, |a, &b| a.max(b));
    create_graph(&positions, &[], Vec::new(), map_size)
}

/// Hub plus one charging station `distance` away.
pub fn charging_line(distance: f64) -> RouteGraph {
    create_graph(
        &[(0.0, 0.0), (distance, 0.0)],
        &[1],
        Vec::new(),
        distance.max(1.0),
    )
}

/// Hub plus one plain delivery node `distance` away.
pub fn delivery_line(distance: f64) -> RouteGraph {
    create_graph(
        &[(0.0, 0.0), (distance, 0.0)],
        &[],
        Vec::new(),
        distance.max(1.0),
    )
}
