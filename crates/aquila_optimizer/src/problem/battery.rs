use crate::problem::{edge::EdgeWeight, node::Node};

pub const FULL_BATTERY: f64 = 100.0;

/// Dropping below this after an edge forces a counted mid-flight recharge.
pub const RECHARGE_THRESHOLD: f64 = 20.0;

/// Arriving at a charging station below this tops the battery up for free.
pub const TOP_UP_THRESHOLD: f64 = 80.0;

/// One battery unit covers this much distance.
pub const DISTANCE_PER_BATTERY_UNIT: f64 = 100.0;

/// Battery accounting shared by the route evaluator and the exact search.
#[derive(Debug, Clone, Copy)]
pub struct BatteryState {
    level: f64,
    recharges: u32,
}

impl BatteryState {
    pub fn full() -> Self {
        BatteryState {
            level: FULL_BATTERY,
            recharges: 0,
        }
    }

    /// Consume an edge. A level below the threshold counts one recharge and
    /// refills the battery.
    pub fn traverse(&mut self, weight: &EdgeWeight) {
        self.level -= weight.battery;
        if self.level < RECHARGE_THRESHOLD {
            self.recharges += 1;
            self.level = FULL_BATTERY;
        }
    }

    /// Opportunistic top-up on arrival; never counted as a recharge.
    pub fn arrive(&mut self, node: &Node) {
        if node.is_charging() && self.level < TOP_UP_THRESHOLD {
            self.level = FULL_BATTERY;
        }
    }

    /// Closing leg of an exhaustive search: only full depletion counts, and
    /// the level is not reset afterwards.
    pub fn close(&mut self, weight: &EdgeWeight) {
        if self.level - weight.battery < 0.0 {
            self.recharges += 1;
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn recharges(&self) -> u32 {
        self.recharges
    }
}
