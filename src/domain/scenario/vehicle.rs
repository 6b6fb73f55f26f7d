use std::collections::BTreeMap;

use crate::domain::utils::id::{EdgeId, ParkingAreaId, VehicleId};

/// A vehicle of a generated scenario. All times are seconds from scenario start.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub parking_area: ParkingAreaId,
    pub entry_edge: EdgeId,
    /// Start edge through the entry edge to the exit edge.
    pub route: Vec<EdgeId>,
    pub depart: f64,
    pub estimated_arrival: f64,
    pub stop_duration: f64,
    /// Estimated time at which the vehicle leaves the parking area.
    pub scheduled_exit: f64,
}

/// One complete generated set of vehicles.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Sorted by departure time.
    pub vehicles: Vec<Vehicle>,
    pub assignments: BTreeMap<ParkingAreaId, u32>,
    pub synchronization_anchor: f64,
    /// Vehicles the generator aimed for; may exceed `vehicles.len()` if capacity ran out.
    pub target_count: usize,
    pub seed: Option<u64>,
}

impl Scenario {
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn reached_target(&self) -> bool {
        self.vehicles.len() >= self.target_count
    }
}
