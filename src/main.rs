mod cli;

use anyhow::{Context, bail};
use clap::Parser;

use crate::cli::{Cli, Command, GenerateArgs, SimulateArgs};
use parking_scenario_gen::config::ScenarioConfig;
use parking_scenario_gen::domain::catalog::route_catalog::RouteCatalog;
use parking_scenario_gen::domain::driver::run_driver::SimulationDriver;
use parking_scenario_gen::domain::scenario::generator::ScenarioGenerator;
use parking_scenario_gen::domain::simulator::simulator::SumoSimulator;
use parking_scenario_gen::{build_and_save_catalog, generate_scenario_file, load_network_graph, logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let config = ScenarioConfig::load(&cli.config).with_context(|| format!("loading configuration '{}'", cli.config.display()))?;

    match cli.command {
        Command::BuildCatalog => {
            let catalog = build_and_save_catalog(&config).context("building route catalog")?;
            if catalog.is_empty() {
                bail!("no parking edge is reachable from '{}' and connected to '{}'", config.start_edge, config.exit_edge);
            }
        }
        Command::Generate(args) => generate(&config, args)?,
        Command::Simulate(args) => simulate(config, args)?,
    }

    Ok(())
}

fn generate(config: &ScenarioConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let output = args.output.unwrap_or_else(|| config.route_file.clone());
    let scenario = generate_scenario_file(config, args.seed, &output).context("generating scenario")?;

    log::info!("Generated {} of {} requested vehicles into '{}'.", scenario.len(), scenario.target_count, output.display());
    Ok(())
}

fn simulate(mut config: ScenarioConfig, args: SimulateArgs) -> anyhow::Result<()> {
    if let Some(runs) = args.runs {
        config.driver.runs = runs;
    }
    if let Some(base_seed) = args.base_seed {
        config.driver.base_seed = base_seed;
    }
    if let Some(workers) = args.workers {
        config.driver.workers = workers.max(1);
    }
    if let Some(out_dir) = args.out_dir {
        config.driver.out_dir = out_dir;
    }

    let simulator = SumoSimulator::from_environment(config.simulator.clone())?;
    let graph = load_network_graph(&config.net_file).context("loading network")?;
    let catalog = RouteCatalog::load(&config.catalog_file).context("loading route catalog")?;
    let generator = ScenarioGenerator::new(&catalog, &graph, &config.capacities, config.generator.clone())?;

    let driver = SimulationDriver::new(&generator, &simulator, config.exit_edge.clone(), config.driver.clone());
    driver.run_all().context("running simulations")?;

    Ok(())
}
