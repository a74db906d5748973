use aquila_core::Polygon;

use crate::{
    pareto::objectives::Objectives,
    problem::{
        battery::BatteryState,
        edge::{Edge, EdgeWeight, risk_from_clearance},
        node::{HUB, Node, NodeIdx},
    },
};

/// Immutable routing graph: nodes, no-fly zones and a dense directed edge
/// table over every ordered pair of distinct nodes.
///
/// The table is flat; the edge `from → to` lives at
/// `from * num_nodes + to`. Diagonal slots hold no edge.
pub struct RouteGraph {
    nodes: Vec<Node>,
    edges: Vec<Option<Edge>>,
    no_fly_zones: Vec<Polygon>,
    map_size: f64,
}

impl RouteGraph {
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.get()]
    }

    pub fn hub(&self) -> &Node {
        &self.nodes[HUB.get()]
    }

    pub fn no_fly_zones(&self) -> &[Polygon] {
        &self.no_fly_zones
    }

    pub fn map_size(&self) -> f64 {
        self.map_size
    }

    #[inline(always)]
    fn edge_index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.nodes.len() + to.get()
    }

    pub fn edge(&self, from: NodeIdx, to: NodeIdx) -> Option<&Edge> {
        self.edges[self.edge_index(from, to)].as_ref()
    }

    pub fn weight(&self, from: NodeIdx, to: NodeIdx) -> Option<&EdgeWeight> {
        self.edge(from, to).map(Edge::weight)
    }

    pub fn is_valid_edge(&self, from: NodeIdx, to: NodeIdx) -> bool {
        self.edge(from, to).is_some_and(Edge::is_valid)
    }

    /// Score a node sequence under the shared cost model. Missing or invalid
    /// legs make the result infeasible but the scalars still accumulate over
    /// whatever legs exist.
    pub fn evaluate_route(&self, route: &[NodeIdx]) -> (Objectives, bool) {
        let mut objectives = Objectives::zero();
        let mut feasible = true;
        let mut battery = BatteryState::full();

        for pair in route.windows(2) {
            let Some(edge) = self.edge(pair[0], pair[1]) else {
                feasible = false;
                continue;
            };

            if !edge.is_valid() {
                feasible = false;
            }

            objectives.distance += edge.weight().distance;
            objectives.risk += edge.weight().risk;
            battery.traverse(edge.weight());
            battery.arrive(self.node(pair[1]));
        }

        objectives.recharges = battery.recharges();
        (objectives, feasible)
    }
}

#[derive(Default)]
pub struct RouteGraphBuilder {
    nodes: Option<Vec<Node>>,
    no_fly_zones: Vec<Polygon>,
    map_size: Option<f64>,
}

impl RouteGraphBuilder {
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> &mut RouteGraphBuilder {
        self.nodes = Some(nodes);
        self
    }

    pub fn set_no_fly_zones(&mut self, no_fly_zones: Vec<Polygon>) -> &mut RouteGraphBuilder {
        self.no_fly_zones = no_fly_zones;
        self
    }

    pub fn add_no_fly_zone(&mut self, zone: Polygon) -> &mut RouteGraphBuilder {
        self.no_fly_zones.push(zone);
        self
    }

    pub fn set_map_size(&mut self, map_size: f64) -> &mut RouteGraphBuilder {
        self.map_size = Some(map_size);
        self
    }

    pub fn build(self) -> RouteGraph {
        let nodes = self.nodes.expect("Expected list of nodes");
        let map_size = self.map_size.expect("Expected map size");

        if !nodes.first().is_some_and(Node::is_hub) {
            panic!("Node 0 must be the hub");
        }
        for (index, node) in nodes.iter().enumerate() {
            if node.idx().get() != index {
                panic!("Node ids must be sequential starting from 0");
            }
        }

        let edges = Self::build_edges(&nodes, &self.no_fly_zones);

        RouteGraph {
            nodes,
            edges,
            no_fly_zones: self.no_fly_zones,
            map_size,
        }
    }

    fn build_edges(nodes: &[Node], zones: &[Polygon]) -> Vec<Option<Edge>> {
        let n = nodes.len();
        let mut edges = Vec::with_capacity(n * n);

        for from in nodes {
            for to in nodes {
                if from.idx() == to.idx() {
                    edges.push(None);
                    continue;
                }

                edges.push(Some(Self::build_edge(from, to, zones)));
            }
        }

        edges
    }

    fn build_edge(from: &Node, to: &Node, zones: &[Polygon]) -> Edge {
        let source = from.position();
        let target = to.position();
        let distance = source.distance(target);

        let valid = !zones
            .iter()
            .any(|zone| zone.intersects_segment(source, target));

        let risk = if zones.is_empty() {
            0.0
        } else {
            let clearance = zones
                .iter()
                .map(|zone| zone.distance_to_segment(source, target))
                .fold(f64::INFINITY, f64::min);
            risk_from_clearance(clearance)
        };

        Edge::new(from.idx(), to.idx(), EdgeWeight::new(distance, risk), valid)
    }
}
