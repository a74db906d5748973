use std::path::PathBuf;

use clap::Args;
use tracing::info;

use aquila_optimizer::json::report::{ExperimentReport, SolverRun};

use crate::{
    file_utils,
    solve::{Algorithm, BudgetArgs, run_algorithm},
};

#[derive(Args)]
pub struct ExperimentArgs {
    /// Instance file to run the comparison on
    #[arg(short, long)]
    input: PathBuf,

    #[command(flatten)]
    budgets: BudgetArgs,

    /// Output report file; stdout when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn summarize(name: &str, run: &SolverRun) {
    info!(
        algorithm = name,
        front_size = run.pareto_front.len(),
        hypervolume = format!("{:.1}", run.hypervolume),
        diversity = format!("{:.3}", run.diversity),
        time_secs = format!("{:.3}", run.time),
        memory_mb = format!("{:.2}", run.memory),
        "solver finished"
    );
}

pub fn run(args: ExperimentArgs) -> anyhow::Result<()> {
    let graph = file_utils::read_instance(&args.input)?;
    info!(
        nodes = graph.num_nodes(),
        zones = graph.no_fly_zones().len(),
        "experiment started"
    );

    let exact = run_algorithm(&graph, Algorithm::Exact, &args.budgets);
    summarize("exact", &exact);

    let heuristic = run_algorithm(&graph, Algorithm::Heuristic, &args.budgets);
    summarize("heuristic", &heuristic);

    let meta = run_algorithm(&graph, Algorithm::Meta, &args.budgets);
    summarize("meta", &meta);

    let report = ExperimentReport {
        exact: Some(exact),
        heuristic: Some(heuristic),
        meta: Some(meta),
    };

    file_utils::write_output(args.out.as_deref(), &report.to_json()?)?;

    Ok(())
}
