use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::domain::driver::metrics::{RunMetrics, write_summary};
use crate::domain::scenario::generator::ScenarioGenerator;
use crate::domain::simulator::simulator::{SimulationRequest, TrafficSimulator};
use crate::domain::utils::id::EdgeId;
use crate::error::{ConversionError, Result};
use crate::loader::tripinfo_parser::parse_tripinfo_file;
use crate::writer::route_file::write_route_file;

const ANALYTICS_TARGET: &str = "analytics";
pub const SUMMARY_FILE: &str = "summary.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct DriverSettings {
    pub runs: u64,
    pub first_run_id: u64,
    /// Run `id` is generated with seed `base_seed + id`.
    pub base_seed: u64,
    pub out_dir: PathBuf,
    pub workers: usize,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self { runs: 200, first_run_id: 1, base_seed: 0, out_dir: PathBuf::from("sim_results"), workers: 1 }
    }
}

impl DriverSettings {
    pub fn seed_for(&self, run_id: u64) -> u64 {
        self.base_seed.wrapping_add(run_id)
    }

    /// Exclusive end of the run id range.
    pub fn last_run_id(&self) -> std::result::Result<u64, ConversionError> {
        self.first_run_id.checked_add(self.runs).ok_or_else(|| ConversionError::InvalidValue {
            field: "runs",
            reason: format!("{} runs starting at {} exceed the run id range", self.runs, self.first_run_id),
        })
    }

    pub fn route_file_for(&self, run_id: u64) -> PathBuf {
        self.out_dir.join(format!("run{:03}", run_id)).join("scenario.rou.xml")
    }

    pub fn tripinfo_file_for(&self, run_id: u64) -> PathBuf {
        self.out_dir.join(format!("tripinfo_run{:03}.xml", run_id))
    }

    pub fn summary_file(&self) -> PathBuf {
        self.out_dir.join(SUMMARY_FILE)
    }
}

/// Repeats generate -> simulate -> measure for a range of runs.
///
/// Every run has its own seed and output files, so runs are independent and are
/// spread over `workers` threads.
#[derive(Debug)]
pub struct SimulationDriver<'a, S: TrafficSimulator> {
    generator: &'a ScenarioGenerator<'a>,
    simulator: &'a S,
    exit_edge: EdgeId,
    settings: DriverSettings,
}

impl<'a, S: TrafficSimulator> SimulationDriver<'a, S> {
    pub fn new(generator: &'a ScenarioGenerator<'a>, simulator: &'a S, exit_edge: EdgeId, settings: DriverSettings) -> Self {
        Self { generator, simulator, exit_edge, settings }
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Executes all runs and writes the summary CSV. Results are ordered by run id.
    pub fn run_all(&self) -> Result<Vec<RunMetrics>> {
        let first = self.settings.first_run_id;
        let last = self.settings.last_run_id()?;

        std::fs::create_dir_all(&self.settings.out_dir)?;
        let pool = rayon::ThreadPoolBuilder::new().num_threads(self.settings.workers.max(1)).build()?;

        log::info!("Starting {} runs ({}..{}) on {} worker(s).", self.settings.runs, first, last, self.settings.workers.max(1));

        let results: Result<Vec<RunMetrics>> = pool.install(|| (first..last).into_par_iter().map(|run_id| self.run_one(run_id)).collect());
        let results = results?;

        write_summary(self.settings.summary_file(), &results)?;
        log::info!("All {} simulations finished. Results in '{}'.", results.len(), self.settings.summary_file().display());

        Ok(results)
    }

    pub fn run_one(&self, run_id: u64) -> Result<RunMetrics> {
        let started = Instant::now();
        let seed = self.settings.seed_for(run_id);

        let scenario = self.generator.generate(Some(seed))?;
        let request = SimulationRequest { run_id, seed, route_file: self.settings.route_file_for(run_id), tripinfo_output: self.settings.tripinfo_file_for(run_id) };

        write_route_file(&request.route_file, &scenario, &self.exit_edge)?;
        self.simulator.run(&request)?;

        let trips = parse_tripinfo_file(&request.tripinfo_output)?;
        let metrics = RunMetrics::from_trips(run_id, &trips);

        tracing::info!(
            target: ANALYTICS_TARGET,
            RunId = run_id,
            Seed = seed,
            GeneratedVehicles = scenario.len(),
            FinishedTrips = metrics.num_veh,
            AvgTravelTime = metrics.avg_travel_time,
            TotalExitTime = metrics.total_exit_time,
            AvgTimeLoss = metrics.avg_time_loss,
            ProcessingTime = started.elapsed().as_millis() as u64,
        );

        Ok(metrics)
    }
}

