use std::f64::consts::TAU;

use aquila_core::{Point, Polygon};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index};
use tracing::debug;

use crate::problem::{
    graph::{RouteGraph, RouteGraphBuilder},
    node::{Node, NodeIdx},
};

/// Share of non-hub nodes that become charging stations (at least one).
pub const CHARGING_RATIO: f64 = 0.15;

/// Minimum clearance between a delivery node and any no-fly zone.
pub const DELIVERY_CLEARANCE: f64 = 3.0;

/// Minimum clearance between the hub and any no-fly zone.
pub const HUB_CLEARANCE: f64 = 5.0;

const PLACEMENT_ATTEMPTS: usize = 1000;

#[derive(Clone, Debug)]
pub struct GeneratorParams {
    pub num_nodes: usize,
    pub num_zones: usize,
    pub map_size: f64,
    pub seed: u64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            num_zones: 3,
            map_size: 100.0,
            seed: 42,
        }
    }
}

/// Deterministic random instance: convex no-fly zones first, then the hub
/// near the map center, then clearance-checked delivery nodes, then the
/// charging-station draw.
pub fn generate_instance(params: &GeneratorParams) -> RouteGraph {
    let mut rng = SmallRng::seed_from_u64(params.seed);

    let zones = generate_zones(&mut rng, params);

    let mut nodes = Vec::with_capacity(params.num_nodes);
    nodes.push(Node::hub(place_hub(&mut rng, params, &zones)));
    for id in 1..params.num_nodes {
        let position = place_delivery(&mut rng, params, &zones);
        nodes.push(Node::delivery(NodeIdx::new(id), position));
    }

    let station_count = charging_station_count(params.num_nodes);
    if station_count > 0 {
        for slot in index::sample(&mut rng, params.num_nodes - 1, station_count) {
            let id = slot + 1;
            let position = *nodes[id].position();
            nodes[id] = Node::charging(NodeIdx::new(id), position);
        }
    }

    debug!(
        nodes = params.num_nodes,
        zones = zones.len(),
        charging_stations = station_count,
        seed = params.seed,
        "generated instance"
    );

    let mut builder = RouteGraphBuilder::default();
    builder.set_nodes(nodes);
    builder.set_no_fly_zones(zones);
    builder.set_map_size(params.map_size);
    builder.build()
}

fn charging_station_count(num_nodes: usize) -> usize {
    if num_nodes < 2 {
        return 0;
    }
    let wanted = (CHARGING_RATIO * (num_nodes - 1) as f64).round() as usize;
    wanted.clamp(1, num_nodes - 1)
}

/// Convex polygon with 4–7 vertices: points on a circle at sorted random
/// angles. Zone centers keep away from the map center so the hub placement
/// below cannot starve.
fn generate_zones(rng: &mut SmallRng, params: &GeneratorParams) -> Vec<Polygon> {
    let center = params.map_size / 2.0;

    (0..params.num_zones)
        .map(|_| {
            let (zone_x, zone_y) = loop {
                let x = rng.random_range(0.1..0.9) * params.map_size;
                let y = rng.random_range(0.1..0.9) * params.map_size;
                let off_center = ((x - center).powi(2) + (y - center).powi(2)).sqrt();
                if off_center >= 0.25 * params.map_size {
                    break (x, y);
                }
            };

            let radius = rng.random_range(0.05..0.12) * params.map_size;
            let vertex_count = rng.random_range(4..=7);
            let mut angles: Vec<f64> =
                (0..vertex_count).map(|_| rng.random_range(0.0..TAU)).collect();
            angles.sort_by(f64::total_cmp);

            Polygon::new(
                angles
                    .into_iter()
                    .map(|angle| {
                        Point::new(zone_x + radius * angle.cos(), zone_y + radius * angle.sin())
                    })
                    .collect(),
            )
        })
        .collect()
}

fn clearance(zones: &[Polygon], position: &Point) -> f64 {
    zones
        .iter()
        .map(|zone| zone.distance_to_point(position))
        .fold(f64::INFINITY, f64::min)
}

fn place_hub(rng: &mut SmallRng, params: &GeneratorParams, zones: &[Polygon]) -> Point {
    let center = params.map_size / 2.0;

    for _ in 0..PLACEMENT_ATTEMPTS {
        let jitter = 0.05 * params.map_size;
        let candidate = Point::new(
            center + rng.random_range(-jitter..=jitter),
            center + rng.random_range(-jitter..=jitter),
        );
        if clearance(zones, &candidate) >= HUB_CLEARANCE {
            return candidate;
        }
    }

    panic!("could not place the hub clear of the no-fly zones");
}

fn place_delivery(rng: &mut SmallRng, params: &GeneratorParams, zones: &[Polygon]) -> Point {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = Point::new(
            rng.random_range(0.0..params.map_size),
            rng.random_range(0.0..params.map_size),
        );
        if clearance(zones, &candidate) >= DELIVERY_CLEARANCE {
            return candidate;
        }
    }

    panic!("could not place a delivery node clear of the no-fly zones");
}
