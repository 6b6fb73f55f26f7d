use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted form of a route catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntryDto {
    /// Space separated edge sequence from the start edge to the exit edge.
    pub via: String,
    /// Parking area served by this entry.
    pub parking: String,
}

/// Keyed by `<entry edge>_<parking area>`.
pub type RouteCatalogDto = BTreeMap<String, CatalogEntryDto>;
