use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "parking-scenario-gen", version, about = "Generates parking-constrained route scenarios for a traffic simulator")]
pub struct Cli {
    /// Scenario configuration file (JSON).
    #[arg(short, long, global = true, default_value = "scenario.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve routes for all parking areas and write the route catalog.
    BuildCatalog,

    /// Generate a single route file.
    Generate(GenerateArgs),

    /// Run generation and simulation repeatedly and write a summary CSV.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Seed for all random draws; omit for a non-reproducible scenario.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output route file; defaults to the configured `routeFile`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[arg(long)]
    pub runs: Option<u64>,

    #[arg(long)]
    pub base_seed: Option<u64>,

    #[arg(long)]
    pub workers: Option<usize>,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}
