use std::path::{Path, PathBuf};

use crate::api::config_dto::{DriverDto, GapScaleDto, GeneratorDto, ScenarioConfigDto, SimulatorDto, TargetCountDto};
use crate::domain::driver::run_driver::DriverSettings;
use crate::domain::scenario::config::{GapScale, GeneratorConfig, StopDurationStrategy, TargetCount};
use crate::domain::scenario::parking_area::CapacityTable;
use crate::domain::simulator::simulator::SumoSettings;
use crate::domain::utils::id::EdgeId;
use crate::error::{ConversionError, Result};
use crate::loader::parser::parse_json_file;

/// Validated scenario configuration.
///
/// Relative paths in the file are resolved against the directory that contains it.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub net_file: PathBuf,
    pub additional_file: PathBuf,
    pub start_edge: EdgeId,
    pub exit_edge: EdgeId,
    pub catalog_file: PathBuf,
    pub route_file: PathBuf,
    pub capacities: CapacityTable,
    pub generator: GeneratorConfig,
    pub simulator: SumoSettings,
    pub driver: DriverSettings,
}

impl ScenarioConfig {
    pub fn load(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let dto: ScenarioConfigDto = parse_json_file(file_path)?;
        let base_dir = file_path.parent().unwrap_or(Path::new(""));

        let config = Self::from_dto(dto, base_dir)?;
        log::info!("Configuration loaded from '{}'.", file_path.display());

        Ok(config)
    }

    pub fn from_dto(dto: ScenarioConfigDto, base_dir: &Path) -> std::result::Result<Self, ConversionError> {
        let resolve = |p: &str| -> PathBuf {
            let path = Path::new(p);
            if path.is_absolute() { path.to_path_buf() } else { base_dir.join(path) }
        };

        let mut simulator = SumoSettings::try_from(dto.simulator)?;
        simulator.config_file = resolve(&simulator.config_file.to_string_lossy());

        let mut driver = DriverSettings::try_from(dto.driver)?;
        driver.out_dir = resolve(&driver.out_dir.to_string_lossy());

        Ok(ScenarioConfig {
            net_file: resolve(&dto.network.net_file),
            additional_file: resolve(&dto.network.additional_file),
            start_edge: EdgeId::new(dto.network.start_edge),
            exit_edge: EdgeId::new(dto.network.exit_edge),
            catalog_file: resolve(&dto.catalog_file),
            route_file: resolve(&dto.route_file),
            capacities: CapacityTable::try_from(dto.capacities)?,
            generator: GeneratorConfig::try_from(dto.generator)?,
            simulator,
            driver,
        })
    }
}

impl TryFrom<GeneratorDto> for GeneratorConfig {
    type Error = ConversionError;

    fn try_from(dto: GeneratorDto) -> std::result::Result<Self, Self::Error> {
        let target_count = match dto.target_count {
            TargetCountDto::Fixed { count } => TargetCount::Fixed(count),
            TargetCountDto::FractionOfCapacity { fraction } => TargetCount::FractionOfCapacity(fraction),
            TargetCountDto::RandomFractionRange { min, max } => TargetCount::RandomFractionRange { min, max },
        };
        let gap_scale = match dto.gap_scale {
            GapScaleDto::Constant { scale } => GapScale::Constant(scale),
            GapScaleDto::EdgeLinear { base, slope } => GapScale::EdgeLinear { base, slope },
        };

        let config = GeneratorConfig {
            target_count,
            edge_bias: dto.edge_bias,
            entry_edge_selection: dto.entry_edge_selection.parse()?,
            departure_mean: dto.departure_mean,
            departure_spread: dto.departure_spread,
            reference_speed: dto.reference_speed,
            travel_time_basis: dto.travel_time_basis.parse()?,
            anchor_buffer: dto.anchor_buffer,
            exit_order: dto.exit_order.parse()?,
            gap_scale,
            duration_strategy: StopDurationStrategy::from_name(&dto.duration_strategy, dto.uniform_duration_min, dto.uniform_duration_max)?,
        };

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<SimulatorDto> for SumoSettings {
    type Error = ConversionError;

    fn try_from(dto: SimulatorDto) -> std::result::Result<Self, Self::Error> {
        if !(dto.step_length.is_finite() && dto.step_length > 0.0) {
            return Err(ConversionError::InvalidValue { field: "stepLength", reason: format!("{} is not positive", dto.step_length) });
        }
        if !(dto.end_time.is_finite() && dto.end_time > 0.0) {
            return Err(ConversionError::InvalidValue { field: "endTime", reason: format!("{} is not positive", dto.end_time) });
        }

        Ok(SumoSettings {
            binary: dto.binary,
            config_file: PathBuf::from(dto.config_file),
            step_length: dto.step_length,
            delay: dto.delay,
            lateral_resolution: dto.lateral_resolution,
            end_time: dto.end_time,
        })
    }
}

impl TryFrom<DriverDto> for DriverSettings {
    type Error = ConversionError;

    fn try_from(dto: DriverDto) -> std::result::Result<Self, Self::Error> {
        if dto.workers == 0 {
            return Err(ConversionError::InvalidValue { field: "workers", reason: "at least one worker is required".to_string() });
        }

        let settings = DriverSettings { runs: dto.runs, first_run_id: dto.first_run_id, base_seed: dto.base_seed, out_dir: PathBuf::from(dto.out_dir), workers: dto.workers };
        settings.last_run_id()?;

        Ok(settings)
    }
}
