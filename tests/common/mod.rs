#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use parking_scenario_gen::domain::catalog::catalog_builder::build_route_catalog;
use parking_scenario_gen::domain::catalog::route_catalog::RouteCatalog;
use parking_scenario_gen::domain::network::network_graph::NetworkGraph;
use parking_scenario_gen::domain::utils::id::EdgeId;
use parking_scenario_gen::loader::network_parser::parse_network;
use parking_scenario_gen::loader::parking_parser::parse_parking_areas;

pub const START_EDGE: &str = "E0";
pub const EXIT_EDGE: &str = "E9";

/// Start edge `E0`, parking edges `E1`..`E3` in a chain, every parking edge connected
/// to the exit `E9`. Edge `E5` hosts `pa_dead` but cannot reach the exit.
pub const NETWORK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<net>
    <edge id="E0" length="10.0"><lane id="E0_0" length="10.0"/></edge>
    <edge id="E1"><lane id="E1_0" length="4.0"/><lane id="E1_1" length="6.0"/></edge>
    <edge id="E2" length="10.0"><lane id="E2_0" length="10.0"/></edge>
    <edge id="E3" length="10.0"><lane id="E3_0" length="10.0"/></edge>
    <edge id="E5" length="10.0"><lane id="E5_0" length="10.0"/></edge>
    <edge id="E9" length="50.0"><lane id="E9_0" length="50.0"/></edge>
    <connection from="E0" to="E1"/>
    <connection from="E1" to="E2"/>
    <connection from="E2" to="E3"/>
    <connection from="E0" to="E5"/>
    <connection from="E1" to="E9"/>
    <connection from="E2" to="E9"/>
    <connection from="E3" to="E9"/>
</net>
"#;

pub const PARKING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<additional>
    <parkingArea id="pa_0" lane="E1_0" startPos="0" endPos="10"/>
    <parkingArea id="pa_0" lane="E2_0" startPos="0" endPos="10"/>
    <parkingArea id="pa_0" lane="E3_0" startPos="0" endPos="10"/>
    <parkingArea id="pa_1" lane="E3_0" startPos="0" endPos="10"/>
    <parkingArea id="pa_dead" lane="E5_0" startPos="0" endPos="10"/>
</additional>
"#;

pub fn edge(id: &str) -> EdgeId {
    EdgeId::new(id)
}

pub fn edges(ids: &[&str]) -> Vec<EdgeId> {
    ids.iter().map(|id| EdgeId::new(*id)).collect()
}

pub fn fixture_graph() -> NetworkGraph {
    NetworkGraph::from(parse_network(NETWORK_XML.as_bytes(), "fixture.net.xml").unwrap())
}

pub fn fixture_catalog(graph: &NetworkGraph) -> RouteCatalog {
    let layout = parse_parking_areas(PARKING_XML.as_bytes(), "fixture.add.xml").unwrap();
    build_route_catalog(graph, &layout, &edge(START_EDGE), &edge(EXIT_EDGE)).unwrap()
}

/// Writes the fixture network, parking file and a config into `dir` and returns the config path.
pub fn write_fixture_files(dir: &Path, generator_json: &str) -> PathBuf {
    fs::write(dir.join("fixture.net.xml"), NETWORK_XML).unwrap();
    fs::write(dir.join("fixture.add.xml"), PARKING_XML).unwrap();

    let config = format!(
        r#"{{
    "network": {{
        "netFile": "fixture.net.xml",
        "additionalFile": "fixture.add.xml",
        "startEdge": "{start}",
        "exitEdge": "{exit}"
    }},
    "catalogFile": "routes.json",
    "routeFile": "scenario.rou.xml",
    "capacities": {{ "pa_0": 3, "pa_1": 2 }},
    "generator": {generator},
    "driver": {{ "runs": 3, "baseSeed": 100, "outDir": "sim_results", "workers": 2 }}
}}"#,
        start = START_EDGE,
        exit = EXIT_EDGE,
        generator = generator_json
    );

    let config_path = dir.join("scenario.json");
    fs::write(&config_path, config).unwrap();
    config_path
}
