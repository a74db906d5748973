use clap::{Parser, Subcommand};

use crate::{experiment::ExperimentArgs, generate::GenerateArgs, solve::SolveArgs};

mod experiment;
mod file_utils;
mod generate;
mod memory;
mod solve;

#[global_allocator]
static ALLOC: memory::TrackingAllocator = memory::TrackingAllocator;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random instance file
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Solve an instance with one or all algorithms
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Run every solver on an instance and tabulate the results
    Experiment {
        #[command(flatten)]
        args: ExperimentArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Generate { args } => generate::run(args)?,
        Commands::Solve { args } => solve::run(args)?,
        Commands::Experiment { args } => experiment::run(args)?,
    }

    Ok(())
}
