use std::path::Path;

use crate::config::ScenarioConfig;
use crate::domain::catalog::catalog_builder::build_route_catalog;
use crate::domain::catalog::route_catalog::RouteCatalog;
use crate::domain::network::network_graph::NetworkGraph;
use crate::domain::scenario::generator::ScenarioGenerator;
use crate::domain::scenario::vehicle::Scenario;
use crate::error::Result;
use crate::loader::network_parser::parse_network_file;
use crate::loader::parking_parser::parse_parking_file;
use crate::writer::route_file::write_route_file;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod writer;

pub fn load_network_graph(net_file: impl AsRef<Path>) -> Result<NetworkGraph> {
    Ok(NetworkGraph::from(parse_network_file(net_file)?))
}

/// Resolves a route for every parking edge of the configuration and persists the catalog.
pub fn build_and_save_catalog(config: &ScenarioConfig) -> Result<RouteCatalog> {
    let graph = load_network_graph(&config.net_file)?;
    let layout = parse_parking_file(&config.additional_file)?;

    let catalog = build_route_catalog(&graph, &layout, &config.start_edge, &config.exit_edge)?;
    catalog.save(&config.catalog_file)?;

    Ok(catalog)
}

/// Generates one scenario from the persisted catalog and writes it to `output`.
///
/// Nothing is written if generation fails.
pub fn generate_scenario_file(config: &ScenarioConfig, seed: Option<u64>, output: impl AsRef<Path>) -> Result<Scenario> {
    let graph = load_network_graph(&config.net_file)?;
    let catalog = RouteCatalog::load(&config.catalog_file)?;

    let generator = ScenarioGenerator::new(&catalog, &graph, &config.capacities, config.generator.clone())?;
    let scenario = generator.generate(seed)?;

    write_route_file(output, &scenario, &config.exit_edge)?;
    Ok(scenario)
}
