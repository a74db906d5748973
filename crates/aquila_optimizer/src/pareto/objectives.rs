use std::ops::{Add, AddAssign};

/// One axis of the objective space; [`Objectives::project`] turns an axis
/// into its scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Distance,
    Risk,
    Recharges,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Distance, Axis::Risk, Axis::Recharges];
}

/// The three minimized objectives of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objectives {
    pub distance: f64,
    pub risk: f64,
    pub recharges: u32,
}

impl Objectives {
    pub const fn new(distance: f64, risk: f64, recharges: u32) -> Self {
        Objectives {
            distance,
            risk,
            recharges,
        }
    }

    pub const fn zero() -> Self {
        Objectives {
            distance: 0.0,
            risk: 0.0,
            recharges: 0,
        }
    }

    pub fn project(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Distance => self.distance,
            Axis::Risk => self.risk,
            Axis::Recharges => self.recharges as f64,
        }
    }

    /// Componentwise Pareto dominance: no worse everywhere, strictly better
    /// somewhere.
    pub fn dominates(&self, other: &Objectives) -> bool {
        let no_worse = self.distance <= other.distance
            && self.risk <= other.risk
            && self.recharges <= other.recharges;
        let better = self.distance < other.distance
            || self.risk < other.risk
            || self.recharges < other.recharges;

        no_worse && better
    }
}

impl Add<Objectives> for Objectives {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Objectives {
            distance: self.distance + other.distance,
            risk: self.risk + other.risk,
            recharges: self.recharges + other.recharges,
        }
    }
}

impl AddAssign<Objectives> for Objectives {
    fn add_assign(&mut self, other: Objectives) {
        self.distance += other.distance;
        self.risk += other.risk;
        self.recharges += other.recharges;
    }
}
