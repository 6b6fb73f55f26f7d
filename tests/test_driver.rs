mod common;

use common::{EXIT_EDGE, edge, fixture_catalog, fixture_graph};
use parking_scenario_gen::domain::driver::metrics::{RunMetrics, write_summary};
use parking_scenario_gen::domain::driver::run_driver::{DriverSettings, SimulationDriver};
use parking_scenario_gen::domain::scenario::config::{GeneratorConfig, TargetCount};
use parking_scenario_gen::domain::scenario::generator::ScenarioGenerator;
use parking_scenario_gen::domain::scenario::parking_area::CapacityTable;
use parking_scenario_gen::domain::simulator::simulator_mock::MockSimulator;
use parking_scenario_gen::error::{ConversionError, Error};
use parking_scenario_gen::loader::tripinfo_parser::{TripInfo, parse_tripinfo_file, parse_tripinfos};
use std::fs;
use std::path::Path;

fn settings(out_dir: &Path, runs: u64, workers: usize) -> DriverSettings {
    DriverSettings { runs, first_run_id: 1, base_seed: 100, out_dir: out_dir.to_path_buf(), workers }
}

fn trip(depart: f64, stop_time: f64, arrival: f64, time_loss: f64) -> TripInfo {
    TripInfo { id: "veh".to_string(), depart, arrival, stop_time, time_loss }
}

#[test]
fn test_run_file_layout() {
    let settings = settings(Path::new("out"), 3, 1);

    assert_eq!(settings.seed_for(7), 107);
    assert_eq!(settings.route_file_for(7), Path::new("out/run007/scenario.rou.xml"));
    assert_eq!(settings.tripinfo_file_for(12), Path::new("out/tripinfo_run012.xml"));
    assert_eq!(settings.summary_file(), Path::new("out/summary.csv"));
}

#[test]
fn test_metrics_from_trips() {
    let trips = vec![trip(10.0, 100.0, 150.0, 2.0), trip(20.0, 100.0, 170.0, 4.0)];
    let metrics = RunMetrics::from_trips(3, &trips);

    assert_eq!(metrics.run_id, 3);
    assert_eq!(metrics.num_veh, 2);
    assert_eq!(metrics.avg_travel_time, 45.0);
    assert_eq!(metrics.total_exit_time, 60.0);
    assert_eq!(metrics.avg_time_loss, 3.0);
}

#[test]
fn test_metrics_of_empty_run_are_zero() {
    let metrics = RunMetrics::from_trips(1, &[]);
    assert_eq!(metrics, RunMetrics { run_id: 1, num_veh: 0, avg_travel_time: 0.0, total_exit_time: 0.0, avg_time_loss: 0.0 });
}

#[test]
fn test_tripinfo_parsing() {
    let xml = r#"<tripinfos>
        <tripinfo id="veh0" depart="1.00" arrival="90.50" stopTime="60.00" timeLoss="3.25" duration="89.50"/>
    </tripinfos>"#;
    let trips = parse_tripinfos(xml.as_bytes(), "tripinfo").unwrap();

    assert_eq!(trips, vec![TripInfo { id: "veh0".to_string(), depart: 1.0, arrival: 90.5, stop_time: 60.0, time_loss: 3.25 }]);
    assert_eq!(trips[0].depart_after_parking(), 61.0);
}

#[test]
fn test_summary_csv_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.csv");
    let runs = vec![RunMetrics::from_trips(1, &[trip(0.0, 10.0, 40.0, 1.5)]), RunMetrics::from_trips(2, &[])];

    write_summary(&path, &runs).unwrap();
    let contents = fs::read_to_string(&path).unwrap();

    assert_eq!(contents, "run_id,num_veh,avg_travel_time,total_exit_time,avg_time_loss\n1,1,30.0,30.0,1.5\n2,0,0.0,0.0,0.0\n");
}

#[test]
fn test_driver_runs_every_seed_and_writes_summary() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);
    let capacities = CapacityTable::new().with_capacity("pa_0", 3).with_capacity("pa_1", 2);
    let config = GeneratorConfig { target_count: TargetCount::Fixed(4), ..GeneratorConfig::default() };
    let generator = ScenarioGenerator::new(&catalog, &graph, &capacities, config).unwrap();
    let simulator = MockSimulator::new(30.0, 1.5);
    let dir = tempfile::tempdir().unwrap();

    let driver = SimulationDriver::new(&generator, &simulator, edge(EXIT_EDGE), settings(dir.path(), 3, 2));
    let results = driver.run_all().unwrap();

    assert_eq!(results.iter().map(|m| m.run_id).collect::<Vec<_>>(), vec![1, 2, 3]);
    for metrics in &results {
        assert_eq!(metrics.num_veh, 4);
        assert!((metrics.avg_travel_time - 30.0).abs() < 0.02);
        assert!((metrics.avg_time_loss - 1.5).abs() < 1e-9);
        assert!(driver.settings().route_file_for(metrics.run_id).is_file());
    }

    let mut requests: Vec<(u64, u64)> = simulator.received_requests().iter().map(|r| (r.run_id, r.seed)).collect();
    requests.sort();
    assert_eq!(requests, vec![(1, 101), (2, 102), (3, 103)]);

    let summary = fs::read_to_string(driver.settings().summary_file()).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("1,4,"));
    assert!(rows[3].starts_with("3,4,"));
}

#[test]
fn test_single_run_is_reproducible() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);
    let capacities = CapacityTable::new().with_capacity("pa_0", 3).with_capacity("pa_1", 2);
    let generator = ScenarioGenerator::new(&catalog, &graph, &capacities, GeneratorConfig::default()).unwrap();
    let simulator = MockSimulator::new(25.0, 0.0);
    let dir = tempfile::tempdir().unwrap();
    let driver = SimulationDriver::new(&generator, &simulator, edge(EXIT_EDGE), settings(dir.path(), 1, 1));

    let first = driver.run_one(5).unwrap();
    let first_route = fs::read(driver.settings().route_file_for(5)).unwrap();
    let first_trips = parse_tripinfo_file(driver.settings().tripinfo_file_for(5)).unwrap();

    let second = driver.run_one(5).unwrap();
    let second_route = fs::read(driver.settings().route_file_for(5)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_route, second_route);
    assert_eq!(first_trips.len(), first.num_veh);

    let expected = generator.generate(Some(driver.settings().seed_for(5))).unwrap();
    assert_eq!(expected.len(), first.num_veh);
}

#[test]
fn test_run_range_overflow_is_rejected() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);
    let capacities = CapacityTable::new().with_capacity("pa_0", 3);
    let generator = ScenarioGenerator::new(&catalog, &graph, &capacities, GeneratorConfig::default()).unwrap();
    let simulator = MockSimulator::new(25.0, 0.0);
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("sim_results");
    let driver = SimulationDriver::new(&generator, &simulator, edge(EXIT_EDGE), settings(&out_dir, u64::MAX, 1));

    let result = driver.run_all();

    assert!(matches!(result, Err(Error::ConversionError(ConversionError::InvalidValue { field: "runs", .. }))));
    assert!(simulator.received_requests().is_empty());
    assert!(!out_dir.exists());
}
