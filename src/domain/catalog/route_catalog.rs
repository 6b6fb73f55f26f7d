use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::api::catalog_dto::{CatalogEntryDto, RouteCatalogDto};
use crate::domain::utils::id::{EdgeId, ParkingAreaId};
use crate::error::{Error, Result};
use crate::loader::parser::{parse_json_file, write_json_file};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogKey {
    pub entry_edge: EdgeId,
    pub parking_area: ParkingAreaId,
}

impl CatalogKey {
    pub fn new(entry_edge: EdgeId, parking_area: ParkingAreaId) -> Self {
        Self { entry_edge, parking_area }
    }

    /// Composite key used in the persisted catalog.
    pub fn composite(&self) -> String {
        format!("{}_{}", self.entry_edge, self.parking_area)
    }
}

/// Route from the start edge through `entry_edge` to the exit edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub entry_edge: EdgeId,
    pub parking_area: ParkingAreaId,
    pub route: Vec<EdgeId>,
}

impl CatalogEntry {
    /// Position of the entry edge inside the route.
    pub fn entry_position(&self) -> Option<usize> {
        self.route.iter().position(|edge| edge == &self.entry_edge)
    }

    /// Edges up to and including the entry edge.
    pub fn route_to_entry(&self) -> &[EdgeId] {
        match self.entry_position() {
            Some(idx) => &self.route[..=idx],
            None => &self.route,
        }
    }

    pub fn via(&self) -> String {
        self.route.iter().map(EdgeId::as_str).collect::<Vec<_>>().join(" ")
    }
}

/// Mapping `(entry edge, parking area) -> route`, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    entries: BTreeMap<CatalogKey, CatalogEntry>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. The entry edge must be part of the route.
    pub fn insert(&mut self, entry: CatalogEntry) -> Result<()> {
        if entry.entry_position().is_none() {
            return Err(Error::malformed(
                "route catalog",
                format!("entry edge '{}' of parking area '{}' is not on its route", entry.entry_edge, entry.parking_area),
            ));
        }

        let key = CatalogKey::new(entry.entry_edge.clone(), entry.parking_area.clone());
        self.entries.insert(key, entry);
        Ok(())
    }

    pub fn get(&self, entry_edge: &EdgeId, parking_area: &ParkingAreaId) -> Option<&CatalogEntry> {
        self.entries.get(&CatalogKey::new(entry_edge.clone(), parking_area.clone()))
    }

    /// Entry edges with a known route into `parking_area`, sorted by edge id.
    pub fn entry_edges_for(&self, parking_area: &ParkingAreaId) -> Vec<&EdgeId> {
        self.entries.values().filter(|entry| &entry.parking_area == parking_area).map(|entry| &entry.entry_edge).collect()
    }

    pub fn parking_areas(&self) -> BTreeSet<&ParkingAreaId> {
        self.entries.keys().map(|key| &key.parking_area).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_dto(&self) -> RouteCatalogDto {
        self.entries
            .iter()
            .map(|(key, entry)| (key.composite(), CatalogEntryDto { via: entry.via(), parking: entry.parking_area.to_string() }))
            .collect()
    }

    pub fn save(&self, file_path: impl AsRef<Path>) -> Result<()> {
        write_json_file(file_path.as_ref(), &self.to_dto())?;
        log::info!("Route catalog with {} entries written to '{}'.", self.len(), file_path.as_ref().display());
        Ok(())
    }

    pub fn load(file_path: impl AsRef<Path>) -> Result<Self> {
        let dto: RouteCatalogDto = parse_json_file(file_path.as_ref())?;
        let catalog = RouteCatalog::try_from(dto)?;
        log::info!("Route catalog with {} entries loaded from '{}'.", catalog.len(), file_path.as_ref().display());
        Ok(catalog)
    }
}

impl TryFrom<RouteCatalogDto> for RouteCatalog {
    type Error = Error;

    fn try_from(dto: RouteCatalogDto) -> Result<Self> {
        let mut catalog = RouteCatalog::new();

        for (key, entry_dto) in dto {
            let suffix = format!("_{}", entry_dto.parking);
            let entry_edge = key
                .strip_suffix(&suffix)
                .filter(|edge| !edge.is_empty())
                .ok_or_else(|| Error::malformed("route catalog", format!("key '{}' does not end with parking area '{}'", key, entry_dto.parking)))?;

            let route: Vec<EdgeId> = entry_dto.via.split_whitespace().map(EdgeId::new).collect();

            catalog.insert(CatalogEntry { entry_edge: EdgeId::new(entry_edge), parking_area: ParkingAreaId::new(entry_dto.parking), route })?;
        }

        Ok(catalog)
    }
}
