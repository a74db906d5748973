use aquila_core::{Point, Polygon};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::problem::{
    graph::{RouteGraph, RouteGraphBuilder},
    node::{Node, NodeIdx},
};

#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("instance has no hub node")]
    MissingHub,
    #[error("instance has more than one hub node")]
    MultipleHubs,
    #[error("hub must have id 0, found id {0}")]
    HubNotFirst(usize),
    #[error("node ids must form 0..{expected}, found id {found}")]
    BadNodeId { expected: usize, found: usize },
    #[error("no-fly zone {0} has fewer than 3 vertices")]
    DegeneratePolygon(usize),
    #[error("failed to parse instance JSON")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InstanceFile {
    pub nodes: Vec<NodeRecord>,
    pub no_fly_zones: Vec<ZoneRecord>,
    pub map_size: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub is_hub: bool,
    pub is_charging: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ZoneRecord {
    pub vertices: Vec<[f64; 2]>,
}

impl InstanceFile {
    pub fn from_json(content: &str) -> Result<Self, InstanceError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String, InstanceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Snapshot a graph back into the instance schema; the edge table is not
    /// persisted, it is rebuilt deterministically on load.
    pub fn from_graph(graph: &RouteGraph) -> Self {
        InstanceFile {
            nodes: graph
                .nodes()
                .iter()
                .map(|node| NodeRecord {
                    id: node.idx().get(),
                    x: node.position().x,
                    y: node.position().y,
                    is_hub: node.is_hub(),
                    is_charging: node.is_charging(),
                })
                .collect(),
            no_fly_zones: graph
                .no_fly_zones()
                .iter()
                .map(|zone| ZoneRecord {
                    vertices: zone.vertices().iter().map(|&vertex| vertex.into()).collect(),
                })
                .collect(),
            map_size: graph.map_size(),
        }
    }

    /// Validate and build the routing graph.
    pub fn build_graph(&self) -> Result<RouteGraph, InstanceError> {
        let hub_count = self.nodes.iter().filter(|node| node.is_hub).count();
        match hub_count {
            0 => return Err(InstanceError::MissingHub),
            1 => {}
            _ => return Err(InstanceError::MultipleHubs),
        }

        let hub = self
            .nodes
            .iter()
            .find(|node| node.is_hub)
            .expect("hub existence checked above");
        if hub.id != 0 {
            return Err(InstanceError::HubNotFirst(hub.id));
        }

        let mut records: Vec<&NodeRecord> = self.nodes.iter().collect();
        records.sort_by_key(|record| record.id);
        for (index, record) in records.iter().enumerate() {
            if record.id != index {
                return Err(InstanceError::BadNodeId {
                    expected: self.nodes.len(),
                    found: record.id,
                });
            }
        }

        for (index, zone) in self.no_fly_zones.iter().enumerate() {
            if zone.vertices.len() < 3 {
                return Err(InstanceError::DegeneratePolygon(index));
            }
        }

        let nodes: Vec<Node> = records
            .iter()
            .map(|record| {
                let position = Point::new(record.x, record.y);
                if record.is_hub {
                    Node::hub(position)
                } else if record.is_charging {
                    Node::charging(NodeIdx::new(record.id), position)
                } else {
                    Node::delivery(NodeIdx::new(record.id), position)
                }
            })
            .collect();

        let zones: Vec<Polygon> = self
            .no_fly_zones
            .iter()
            .map(|zone| Polygon::new(zone.vertices.iter().map(|&vertex| vertex.into()).collect()))
            .collect();

        let mut builder = RouteGraphBuilder::default();
        builder.set_nodes(nodes);
        builder.set_no_fly_zones(zones);
        builder.set_map_size(self.map_size);
        Ok(builder.build())
    }
}
