use std::{path::PathBuf, time::Instant};

use clap::{Args, ValueEnum};
use tracing::info;

use aquila_optimizer::{
    json::report::{ExperimentReport, SolverRun},
    pareto::metrics::DEFAULT_REFERENCE_POINT,
    problem::graph::RouteGraph,
    solver::{
        evolutionary::{NsgaParams, NsgaSolver},
        exact::{BranchAndBound, ExactParams},
        heuristic::HeuristicSolver,
    },
};

use crate::{file_utils, memory};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Exact,
    Heuristic,
    Meta,
    All,
}

#[derive(Args)]
pub struct SolveArgs {
    /// Instance file to solve
    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Algorithm::All)]
    algorithm: Algorithm,

    #[command(flatten)]
    pub budgets: BudgetArgs,

    /// Output report file; stdout when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct BudgetArgs {
    /// Search-node budget for the exact solver
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Population size for the evolutionary solver
    #[arg(long, default_value_t = 100)]
    pub population: usize,

    /// Generation count for the evolutionary solver
    #[arg(long, default_value_t = 200)]
    pub generations: usize,

    /// PRNG seed for the evolutionary solver
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,
}

/// Run one solver and wrap its front with timing, peak memory and metrics.
pub fn run_algorithm(graph: &RouteGraph, algorithm: Algorithm, budgets: &BudgetArgs) -> SolverRun {
    let baseline = memory::reset_peak();
    let started = Instant::now();

    let front = match algorithm {
        Algorithm::Exact => {
            BranchAndBound::new(
                graph,
                ExactParams {
                    max_nodes: budgets.max_nodes,
                },
            )
            .solve()
            .front
        }
        Algorithm::Heuristic => HeuristicSolver::new(graph).solve(),
        Algorithm::Meta => NsgaSolver::new(
            graph,
            NsgaParams {
                population_size: budgets.population,
                generations: budgets.generations,
                seed: budgets.seed,
                ..NsgaParams::default()
            },
        )
        .solve(),
        Algorithm::All => unreachable!("expanded by the caller"),
    };

    SolverRun::new(
        &front,
        started.elapsed().as_secs_f64(),
        memory::peak_megabytes_since(baseline),
        DEFAULT_REFERENCE_POINT,
    )
}

pub fn run(args: SolveArgs) -> anyhow::Result<()> {
    let graph = file_utils::read_instance(&args.input)?;
    info!(
        nodes = graph.num_nodes(),
        zones = graph.no_fly_zones().len(),
        "instance loaded"
    );

    let mut report = ExperimentReport::default();
    if matches!(args.algorithm, Algorithm::Exact | Algorithm::All) {
        report.exact = Some(run_algorithm(&graph, Algorithm::Exact, &args.budgets));
    }
    if matches!(args.algorithm, Algorithm::Heuristic | Algorithm::All) {
        report.heuristic = Some(run_algorithm(&graph, Algorithm::Heuristic, &args.budgets));
    }
    if matches!(args.algorithm, Algorithm::Meta | Algorithm::All) {
        report.meta = Some(run_algorithm(&graph, Algorithm::Meta, &args.budgets));
    }

    file_utils::write_output(args.out.as_deref(), &report.to_json()?)?;

    Ok(())
}
