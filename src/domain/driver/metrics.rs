use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::loader::parser::write_atomically;
use crate::loader::tripinfo_parser::TripInfo;

/// Aggregates of one simulator run; field names are the summary CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    pub run_id: u64,
    pub num_veh: usize,
    /// Mean of `arrival - (depart + stopTime)`.
    pub avg_travel_time: f64,
    /// Last arrival minus the first departure from a parking area.
    pub total_exit_time: f64,
    pub avg_time_loss: f64,
}

impl RunMetrics {
    /// Metrics of a run without any finished trip are all zero.
    pub fn from_trips(run_id: u64, trips: &[TripInfo]) -> Self {
        if trips.is_empty() {
            return RunMetrics { run_id, num_veh: 0, avg_travel_time: 0.0, total_exit_time: 0.0, avg_time_loss: 0.0 };
        }

        let count = trips.len() as f64;
        let travel_sum: f64 = trips.iter().map(|t| t.arrival - t.depart_after_parking()).sum();
        let loss_sum: f64 = trips.iter().map(|t| t.time_loss).sum();
        let first_exit = trips.iter().map(TripInfo::depart_after_parking).fold(f64::INFINITY, f64::min);
        let last_arrival = trips.iter().map(|t| t.arrival).fold(f64::NEG_INFINITY, f64::max);

        RunMetrics {
            run_id,
            num_veh: trips.len(),
            avg_travel_time: travel_sum / count,
            total_exit_time: last_arrival - first_exit,
            avg_time_loss: loss_sum / count,
        }
    }
}

/// Writes one CSV row per run, in the given order, with a header line.
pub fn write_summary(file_path: impl AsRef<Path>, runs: &[RunMetrics]) -> Result<()> {
    let mut csv_wtr = csv::Writer::from_writer(Vec::new());
    for run in runs {
        csv_wtr.serialize(run)?;
    }
    csv_wtr.flush()?;

    let contents = csv_wtr.into_inner().map_err(|e| Error::IoError(e.into_error()))?;
    write_atomically(file_path.as_ref(), &contents)?;

    log::info!("Summary of {} runs written to '{}'.", runs.len(), file_path.as_ref().display());
    Ok(())
}
