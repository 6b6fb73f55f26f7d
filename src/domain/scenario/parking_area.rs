use std::collections::BTreeMap;

use crate::domain::utils::id::ParkingAreaId;
use crate::error::ConversionError;

/// Static capacity per parking area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapacityTable {
    capacities: BTreeMap<ParkingAreaId, u32>,
}

impl TryFrom<BTreeMap<String, u32>> for CapacityTable {
    type Error = ConversionError;

    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut capacities = BTreeMap::new();

        for (area, capacity) in raw {
            if capacity == 0 {
                return Err(ConversionError::ZeroCapacity(area));
            }
            capacities.insert(ParkingAreaId::new(area), capacity);
        }

        Ok(CapacityTable { capacities })
    }
}

impl CapacityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, area: impl Into<String>, capacity: u32) -> Self {
        self.capacities.insert(ParkingAreaId::new(area), capacity);
        self
    }

    pub fn capacity(&self, area: &ParkingAreaId) -> Option<u32> {
        self.capacities.get(area).copied()
    }

    pub fn total(&self) -> u64 {
        self.capacities.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParkingAreaId, u32)> {
        self.capacities.iter().map(|(area, &capacity)| (area, capacity))
    }

    pub fn is_empty(&self) -> bool {
        self.capacities.is_empty()
    }
}

/// Number of vehicles assigned per parking area during one generation run.
///
/// Counts only grow and never exceed the capacity they were created with.
#[derive(Debug, Clone)]
pub struct AssignmentCounter {
    slots: BTreeMap<ParkingAreaId, (u32, u32)>,
}

impl AssignmentCounter {
    /// Starts at zero for every area in `areas` with its capacity.
    pub fn new<'a, I>(areas: I) -> Self
    where
        I: IntoIterator<Item = (&'a ParkingAreaId, u32)>,
    {
        Self { slots: areas.into_iter().map(|(area, capacity)| (area.clone(), (0, capacity))).collect() }
    }

    /// Areas whose count is still below capacity, in id order.
    pub fn available(&self) -> Vec<&ParkingAreaId> {
        self.slots.iter().filter(|(_, (count, capacity))| count < capacity).map(|(area, _)| area).collect()
    }

    /// Records one more vehicle; returns `false` and changes nothing if the area is
    /// full or unknown.
    pub fn assign(&mut self, area: &ParkingAreaId) -> bool {
        match self.slots.get_mut(area) {
            Some((count, capacity)) if *count < *capacity => {
                *count += 1;
                true
            }
            _ => false,
        }
    }

    pub fn count(&self, area: &ParkingAreaId) -> u32 {
        self.slots.get(area).map(|(count, _)| *count).unwrap_or(0)
    }

    pub fn counts(&self) -> BTreeMap<ParkingAreaId, u32> {
        self.slots.iter().map(|(area, (count, _))| (area.clone(), *count)).collect()
    }
}
