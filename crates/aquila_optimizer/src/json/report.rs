use serde::Serialize;

use crate::pareto::{
    front::ParetoFront,
    metrics::{hypervolume, spread},
};

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[derive(Serialize, Debug, Clone)]
pub struct ObjectivesRecord {
    pub distance: f64,
    pub risk: f64,
    pub recharges: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct SolutionRecord {
    pub route: Vec<usize>,
    pub objectives: ObjectivesRecord,
    pub feasible: bool,
}

/// One solver's share of the experiment file: wall time, peak memory, the
/// front and its quality metrics.
#[derive(Serialize, Debug, Clone)]
pub struct SolverRun {
    pub time: f64,
    pub memory: f64,
    pub pareto_front: Vec<SolutionRecord>,
    pub hypervolume: f64,
    pub diversity: f64,
}

impl SolverRun {
    pub fn new(front: &ParetoFront, time: f64, memory: f64, reference: (f64, f64)) -> Self {
        SolverRun {
            time,
            memory,
            pareto_front: front
                .iter()
                .map(|solution| SolutionRecord {
                    route: solution.route().iter().map(|idx| idx.get()).collect(),
                    objectives: ObjectivesRecord {
                        distance: round4(solution.objectives().distance),
                        risk: round4(solution.objectives().risk),
                        recharges: solution.objectives().recharges,
                    },
                    feasible: solution.is_feasible(),
                })
                .collect(),
            hypervolume: hypervolume(front, reference),
            diversity: spread(front),
        }
    }
}

/// Experiment file keyed by algorithm, emitted as a single JSON object.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ExperimentReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<SolverRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<SolverRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SolverRun>,
}

impl ExperimentReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
