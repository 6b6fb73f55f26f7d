use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xml::reader::{EventReader, XmlEvent};

use crate::domain::utils::id::{EdgeId, ParkingAreaId};
use crate::error::{Error, Result};
use crate::loader::parser::required_attribute;

/// Parking areas grouped by the edge they are attached to.
#[derive(Debug, Clone, Default)]
pub struct ParkingLayout {
    /// Every edge that hosts at least one parking area, sorted by id.
    pub parking_edges: Vec<EdgeId>,
    /// Parking areas per edge, in document order.
    pub areas_by_edge: BTreeMap<EdgeId, Vec<ParkingAreaId>>,
}

pub fn parse_parking_file(file_path: impl AsRef<Path>) -> Result<ParkingLayout> {
    let path = file_path.as_ref();
    let file = File::open(path)?;
    let layout = parse_parking_areas(BufReader::new(file), &path.display().to_string())?;

    log::info!("Loaded {} parking edges from '{}'.", layout.parking_edges.len(), path.display());

    Ok(layout)
}

/// Reads every `<parkingArea id=".." lane="..">` element.
pub fn parse_parking_areas<R: Read>(reader: R, source_name: &str) -> Result<ParkingLayout> {
    let mut edges: BTreeSet<EdgeId> = BTreeSet::new();
    let mut areas_by_edge: BTreeMap<EdgeId, Vec<ParkingAreaId>> = BTreeMap::new();

    for event in EventReader::new(reader) {
        if let XmlEvent::StartElement { name, attributes, .. } = event? {
            if name.local_name != "parkingArea" {
                continue;
            }

            let area_id = required_attribute(&attributes, "parkingArea", "id", source_name)?;
            let lane = required_attribute(&attributes, "parkingArea", "lane", source_name)?;
            let edge = edge_of_lane(lane).ok_or_else(|| Error::malformed(source_name, format!("parking area '{}' has an invalid lane '{}'", area_id, lane)))?;

            edges.insert(edge.clone());
            areas_by_edge.entry(edge).or_default().push(ParkingAreaId::new(area_id));
        }
    }

    Ok(ParkingLayout { parking_edges: edges.into_iter().collect(), areas_by_edge })
}

/// Lane ids are `<edge>_<index>`; strips the trailing lane index.
pub fn edge_of_lane(lane: &str) -> Option<EdgeId> {
    let edge = match lane.rsplit_once('_') {
        Some((edge, _)) => edge,
        None => lane,
    };

    if edge.is_empty() { None } else { Some(EdgeId::new(edge)) }
}
