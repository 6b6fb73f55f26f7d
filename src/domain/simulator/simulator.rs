use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

pub const SUMO_HOME: &str = "SUMO_HOME";

/// Input and output locations of one simulator run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub run_id: u64,
    /// Seed of the scenario, also handed to the simulator.
    pub seed: u64,
    pub route_file: PathBuf,
    pub tripinfo_output: PathBuf,
}

/// The external traffic simulator, treated as a black box that consumes a route
/// file and produces a trip-result file.
pub trait TrafficSimulator: std::fmt::Debug + Send + Sync {
    fn run(&self, request: &SimulationRequest) -> Result<()>;
}

/// Command line settings for SUMO.
#[derive(Debug, Clone, PartialEq)]
pub struct SumoSettings {
    /// Binary to execute; relative names are resolved in `$SUMO_HOME/bin` first.
    pub binary: String,
    pub config_file: PathBuf,
    pub step_length: f64,
    pub delay: f64,
    pub lateral_resolution: f64,
    /// Simulated seconds after which the run is stopped.
    pub end_time: f64,
}

impl Default for SumoSettings {
    fn default() -> Self {
        Self {
            binary: "sumo".to_string(),
            config_file: PathBuf::from("scenario.sumocfg"),
            step_length: 0.05,
            delay: 1.0,
            lateral_resolution: 0.0,
            end_time: 2000.0,
        }
    }
}

/// Runs SUMO as a child process and waits for it to finish.
#[derive(Debug, Clone)]
pub struct SumoSimulator {
    binary: PathBuf,
    settings: SumoSettings,
}

impl SumoSimulator {
    /// Requires `SUMO_HOME` to be set, as the simulator's tool chain does.
    pub fn from_environment(settings: SumoSettings) -> Result<Self> {
        let home = std::env::var_os(SUMO_HOME).ok_or_else(|| Error::MissingEnvironment(SUMO_HOME.to_string()))?;
        let binary = resolve_binary(Path::new(&home), &settings.binary);

        log::info!("Using simulator binary '{}'.", binary.display());

        Ok(Self { binary, settings })
    }

    pub fn command(&self, request: &SimulationRequest) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-c")
            .arg(&self.settings.config_file)
            .arg("--route-files")
            .arg(&request.route_file)
            .arg("--tripinfo-output")
            .arg(&request.tripinfo_output)
            .arg("--step-length")
            .arg(self.settings.step_length.to_string())
            .arg("--lateral-resolution")
            .arg(self.settings.lateral_resolution.to_string())
            .arg("--end")
            .arg(self.settings.end_time.to_string())
            .arg("--seed")
            .arg(request.seed.to_string());

        if self.is_gui() {
            command.arg("--start").arg("--quit-on-end").arg("--delay").arg(self.settings.delay.to_string());
        }

        command
    }

    fn is_gui(&self) -> bool {
        self.binary.file_stem().map(|stem| stem.to_string_lossy().ends_with("gui")).unwrap_or(false)
    }
}

fn resolve_binary(sumo_home: &Path, binary: &str) -> PathBuf {
    let candidate = Path::new(binary);
    if candidate.is_absolute() || candidate.components().count() > 1 {
        return candidate.to_path_buf();
    }

    let bundled = sumo_home.join("bin").join(binary);
    if bundled.exists() { bundled } else { candidate.to_path_buf() }
}

impl TrafficSimulator for SumoSimulator {
    fn run(&self, request: &SimulationRequest) -> Result<()> {
        let output = self.command(request).output().map_err(|e| Error::SimulatorFailed { run_id: request.run_id, message: format!("could not start '{}': {}", self.binary.display(), e) })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::SimulatorFailed { run_id: request.run_id, message: format!("exit status {}: {}", output.status, stderr.trim()) });
        }

        log::debug!("Simulator run {} finished.", request.run_id);
        Ok(())
    }
}
