use serde::Deserialize;
use std::collections::BTreeMap;

/// Root of the JSON scenario configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfigDto {
    pub network: NetworkDto,
    pub catalog_file: String,
    #[serde(default = "default_route_file")]
    pub route_file: String,
    pub capacities: BTreeMap<String, u32>,
    #[serde(default)]
    pub generator: GeneratorDto,
    #[serde(default)]
    pub simulator: SimulatorDto,
    #[serde(default)]
    pub driver: DriverDto,
}

fn default_route_file() -> String {
    "scenario.rou.xml".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDto {
    pub net_file: String,
    pub additional_file: String,
    pub start_edge: String,
    pub exit_edge: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TargetCountDto {
    Fixed { count: usize },
    FractionOfCapacity { fraction: f64 },
    RandomFractionRange { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum GapScaleDto {
    Constant { scale: f64 },
    EdgeLinear { base: f64, slope: f64 },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorDto {
    pub target_count: TargetCountDto,
    pub edge_bias: f64,
    pub entry_edge_selection: String,
    pub departure_mean: f64,
    pub departure_spread: f64,
    pub reference_speed: f64,
    pub travel_time_basis: String,
    pub anchor_buffer: f64,
    pub exit_order: String,
    pub gap_scale: GapScaleDto,
    pub duration_strategy: String,
    pub uniform_duration_min: f64,
    pub uniform_duration_max: f64,
}

impl Default for GeneratorDto {
    fn default() -> Self {
        Self {
            target_count: TargetCountDto::FractionOfCapacity { fraction: 0.5 },
            edge_bias: -0.1,
            entry_edge_selection: "SpreadFirst".to_string(),
            departure_mean: 20.0,
            departure_spread: 10.0,
            reference_speed: 13.89,
            travel_time_basis: "FullRoute".to_string(),
            anchor_buffer: 20.0,
            exit_order: "lowest-edge-first".to_string(),
            gap_scale: GapScaleDto::Constant { scale: 2.0 },
            duration_strategy: "SynchronizedExit".to_string(),
            uniform_duration_min: 500.0,
            uniform_duration_max: 700.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulatorDto {
    pub binary: String,
    pub config_file: String,
    pub step_length: f64,
    pub delay: f64,
    pub lateral_resolution: f64,
    pub end_time: f64,
}

impl Default for SimulatorDto {
    fn default() -> Self {
        Self {
            binary: "sumo".to_string(),
            config_file: "scenario.sumocfg".to_string(),
            step_length: 0.05,
            delay: 1.0,
            lateral_resolution: 0.0,
            end_time: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverDto {
    pub runs: u64,
    pub first_run_id: u64,
    pub base_seed: u64,
    pub out_dir: String,
    pub workers: usize,
}

impl Default for DriverDto {
    fn default() -> Self {
        Self { runs: 200, first_run_id: 1, base_seed: 0, out_dir: "sim_results".to_string(), workers: 1 }
    }
}
