use std::path::PathBuf;

use clap::Args;
use tracing::info;

use aquila_optimizer::{
    generator::{GeneratorParams, generate_instance},
    json::instance::InstanceFile,
};

use crate::file_utils;

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of nodes, hub included
    #[arg(short, long, default_value_t = 10)]
    nodes: usize,

    /// Number of no-fly zones
    #[arg(short, long, default_value_t = 3)]
    zones: usize,

    /// Side length of the square map
    #[arg(short, long, default_value_t = 100.0)]
    map_size: f64,

    /// PRNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Output instance file
    #[arg(short, long)]
    out: PathBuf,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let graph = generate_instance(&GeneratorParams {
        num_nodes: args.nodes,
        num_zones: args.zones,
        map_size: args.map_size,
        seed: args.seed,
    });

    let json = InstanceFile::from_graph(&graph).to_json()?;
    file_utils::write_output(Some(args.out.as_path()), &json)?;

    info!(
        nodes = args.nodes,
        zones = args.zones,
        seed = args.seed,
        out = %args.out.display(),
        "instance written"
    );

    Ok(())
}
