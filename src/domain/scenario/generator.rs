use rand::distr::Uniform;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::catalog::route_catalog::{CatalogEntry, RouteCatalog};
use crate::domain::network::network_graph::NetworkGraph;
use crate::domain::scenario::config::{EntryEdgeSelection, ExitOrder, GeneratorConfig, StopDurationStrategy, TargetCount, TravelTimeBasis};
use crate::domain::scenario::edge_bias::{edge_index, edge_weights};
use crate::domain::scenario::parking_area::{AssignmentCounter, CapacityTable};
use crate::domain::scenario::vehicle::{Scenario, Vehicle};
use crate::domain::utils::id::{EdgeId, ParkingAreaId, VehicleId};
use crate::error::{Error, Result};

/// Vehicle after assignment, before exit synchronization.
#[derive(Debug, Clone)]
struct Placement<'c> {
    entry: &'c CatalogEntry,
    depart: f64,
    estimated_arrival: f64,
}

/// Assigns vehicles to parking areas under capacity limits and schedules their exits.
///
/// The catalog, graph and capacity table are shared reference data; all mutable
/// state (counters, random number generator, vehicle list) lives inside a single
/// [`ScenarioGenerator::generate`] call.
#[derive(Debug)]
pub struct ScenarioGenerator<'a> {
    catalog: &'a RouteCatalog,
    graph: &'a NetworkGraph,
    capacities: &'a CapacityTable,
    config: GeneratorConfig,
}

impl<'a> ScenarioGenerator<'a> {
    pub fn new(catalog: &'a RouteCatalog, graph: &'a NetworkGraph, capacities: &'a CapacityTable, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, graph, capacities, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one scenario. The same seed with the same inputs yields the same scenario.
    ///
    /// Fails with [`Error::EmptyAssignment`] if not a single vehicle can be placed.
    pub fn generate(&self, seed: Option<u64>) -> Result<Scenario> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let entries_by_area = self.eligible_entries();
        let target_count = self.sample_target_count(&mut rng);

        let (placements, counter) = self.assign(&entries_by_area, target_count, &mut rng)?;
        if placements.is_empty() {
            return Err(Error::EmptyAssignment);
        }

        let anchor = placements.iter().map(|p| p.estimated_arrival).fold(f64::NEG_INFINITY, f64::max) + self.config.anchor_buffer;
        let exits = self.schedule_exits(&placements, anchor, &mut rng)?;

        let mut vehicles: Vec<Vehicle> = placements
            .iter()
            .zip(exits)
            .enumerate()
            .map(|(i, (placement, (stop_duration, scheduled_exit)))| Vehicle {
                id: VehicleId::new(format!("veh{}", i)),
                parking_area: placement.entry.parking_area.clone(),
                entry_edge: placement.entry.entry_edge.clone(),
                route: placement.entry.route.clone(),
                depart: placement.depart,
                estimated_arrival: placement.estimated_arrival,
                stop_duration,
                scheduled_exit,
            })
            .collect();

        vehicles.sort_by(|a, b| a.depart.total_cmp(&b.depart));

        if vehicles.len() < target_count {
            log::warn!("Parking capacity exhausted: placed {} of {} requested vehicles.", vehicles.len(), target_count);
        }
        log::info!("Scenario generated: {} vehicles, synchronization anchor at {:.2} s (seed {:?}).", vehicles.len(), anchor, seed);

        Ok(Scenario { vehicles, assignments: counter.counts(), synchronization_anchor: anchor, target_count, seed })
    }

    /// Catalog entries per parking area, restricted to areas with a configured capacity.
    fn eligible_entries(&self) -> BTreeMap<&'a ParkingAreaId, Vec<&'a CatalogEntry>> {
        let mut entries_by_area: BTreeMap<&ParkingAreaId, Vec<&CatalogEntry>> = BTreeMap::new();

        for entry in self.catalog.iter() {
            if self.capacities.capacity(&entry.parking_area).is_some() {
                entries_by_area.entry(&entry.parking_area).or_default().push(entry);
            } else {
                log::debug!("Parking area {} has routes but no configured capacity; ignored.", entry.parking_area);
            }
        }

        for (area, _) in self.capacities.iter() {
            if !entries_by_area.contains_key(area) {
                log::warn!("Parking area {} has no route in the catalog and will not receive vehicles.", area);
            }
        }

        entries_by_area
    }

    fn sample_target_count(&self, rng: &mut StdRng) -> usize {
        let total = self.capacities.total() as f64;

        match self.config.target_count {
            TargetCount::Fixed(n) => n,
            TargetCount::FractionOfCapacity(fraction) => (fraction * total).floor() as usize,
            TargetCount::RandomFractionRange { min, max } => {
                let low = (min * total).floor() as usize;
                let high = (max * total).floor() as usize;
                rng.random_range(low..=high)
            }
        }
    }

    fn assign<'c>(
        &self,
        entries_by_area: &BTreeMap<&'c ParkingAreaId, Vec<&'c CatalogEntry>>,
        target_count: usize,
        rng: &mut StdRng,
    ) -> Result<(Vec<Placement<'c>>, AssignmentCounter)> {
        let departure = Normal::new(self.config.departure_mean, self.config.departure_spread)
            .map_err(|e| Error::InvalidDistribution(format!("departure offset: {}", e)))?;

        let mut counter = AssignmentCounter::new(entries_by_area.keys().filter_map(|&area| self.capacities.capacity(area).map(|c| (area, c))));
        let mut used_edges: BTreeMap<&'c ParkingAreaId, BTreeSet<&'c EdgeId>> = BTreeMap::new();
        let achievable = usize::try_from(self.capacities.total()).unwrap_or(usize::MAX);
        let mut placements = Vec::with_capacity(target_count.min(achievable));

        while placements.len() < target_count {
            let available = counter.available();
            if available.is_empty() {
                break;
            }

            let picked = available[rng.random_range(0..available.len())];
            let Some((&area, candidates)) = entries_by_area.get_key_value(picked) else {
                break;
            };

            let used = used_edges.entry(area).or_default();
            let entry = self.draw_entry(candidates, used, rng)?;
            used.insert(&entry.entry_edge);

            let depart = departure.sample(rng).abs();
            let estimated_arrival = depart + self.estimate_travel_time(entry);

            counter.assign(area);
            placements.push(Placement { entry, depart, estimated_arrival });
        }

        Ok((placements, counter))
    }

    /// Weighted draw among the area's catalog entries.
    fn draw_entry<'c>(&self, candidates: &[&'c CatalogEntry], used: &mut BTreeSet<&'c EdgeId>, rng: &mut StdRng) -> Result<&'c CatalogEntry> {
        let mut pool: Vec<&CatalogEntry> = match self.config.entry_edge_selection {
            EntryEdgeSelection::WithReplacement => candidates.to_vec(),
            EntryEdgeSelection::SpreadFirst => candidates.iter().copied().filter(|entry| !used.contains(&entry.entry_edge)).collect(),
        };

        if pool.is_empty() {
            used.clear();
            pool = candidates.to_vec();
        }

        let weights = edge_weights(pool.iter().map(|entry| &entry.entry_edge), self.config.edge_bias);
        let index = WeightedIndex::new(&weights).map_err(|e| Error::InvalidDistribution(format!("entry edge weights: {}", e)))?;

        Ok(pool[index.sample(rng)])
    }

    fn estimate_travel_time(&self, entry: &CatalogEntry) -> f64 {
        let edges: &[EdgeId] = match self.config.travel_time_basis {
            TravelTimeBasis::FullRoute => &entry.route,
            TravelTimeBasis::ToEntryEdge => entry.route_to_entry(),
        };

        self.graph.route_length(edges) / self.config.reference_speed
    }

    /// Returns `(stop_duration, scheduled_exit)` per placement, in placement order.
    fn schedule_exits(&self, placements: &[Placement], anchor: f64, rng: &mut StdRng) -> Result<Vec<(f64, f64)>> {
        match self.config.duration_strategy {
            StopDurationStrategy::IndependentUniform { min, max } => {
                let band = Uniform::new_inclusive(min, max).map_err(|e| Error::InvalidDistribution(format!("stop duration: {}", e)))?;
                Ok(placements
                    .iter()
                    .map(|placement| {
                        let duration = band.sample(rng);
                        (duration, placement.estimated_arrival + duration)
                    })
                    .collect())
            }
            StopDurationStrategy::SynchronizedExit => {
                let mut order: Vec<usize> = (0..placements.len()).collect();
                match self.config.exit_order {
                    ExitOrder::LowestEdgeFirst => order.sort_by_key(|&i| edge_index(&placements[i].entry.entry_edge)),
                    ExitOrder::HighestEdgeFirst => order.sort_by_key(|&i| Reverse(edge_index(&placements[i].entry.entry_edge))),
                }

                let mut schedule = vec![(0.0, 0.0); placements.len()];
                let mut exit_time = anchor;

                for i in order {
                    let placement = &placements[i];
                    let scale = self.config.gap_scale.scale_for(&placement.entry.entry_edge);
                    let gap = Exp::new(1.0 / scale).map_err(|e| Error::InvalidDistribution(format!("exit gap: {}", e)))?;
                    exit_time += gap.sample(rng);

                    let duration = (exit_time - placement.estimated_arrival).max(0.0);
                    schedule[i] = (duration, placement.estimated_arrival + duration);
                }

                Ok(schedule)
            }
        }
    }
}
