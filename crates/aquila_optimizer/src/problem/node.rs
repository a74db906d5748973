use aquila_core::Point;

/// Position of a node in the graph's node table. Node ids and table
/// positions coincide, so this is the only id type the crate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(usize);

impl NodeIdx {
    pub const fn new(index: usize) -> Self {
        NodeIdx(index)
    }

    pub const fn get(&self) -> usize {
        self.0
    }
}

/// The hub is always node 0.
pub const HUB: NodeIdx = NodeIdx::new(0);

#[derive(Debug, Clone)]
pub struct Node {
    idx: NodeIdx,
    position: Point,
    is_hub: bool,
    is_charging: bool,
}

impl Node {
    pub fn hub(position: Point) -> Self {
        Node {
            idx: HUB,
            position,
            is_hub: true,
            is_charging: false,
        }
    }

    pub fn delivery(idx: NodeIdx, position: Point) -> Self {
        Node {
            idx,
            position,
            is_hub: false,
            is_charging: false,
        }
    }

    pub fn charging(idx: NodeIdx, position: Point) -> Self {
        Node {
            idx,
            position,
            is_hub: false,
            is_charging: true,
        }
    }

    pub fn idx(&self) -> NodeIdx {
        self.idx
    }

    pub fn position(&self) -> &Point {
        &self.position
    }

    pub fn is_hub(&self) -> bool {
        self.is_hub
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }
}
