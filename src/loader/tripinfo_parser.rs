use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xml::reader::{EventReader, XmlEvent};

use crate::error::Result;
use crate::loader::parser::{attribute, parse_number, required_attribute};

/// One `<tripinfo>` record written by the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct TripInfo {
    pub id: String,
    pub depart: f64,
    pub arrival: f64,
    pub stop_time: f64,
    pub time_loss: f64,
}

impl TripInfo {
    /// Time at which the vehicle left its parking area.
    pub fn depart_after_parking(&self) -> f64 {
        self.depart + self.stop_time
    }
}

pub fn parse_tripinfo_file(file_path: impl AsRef<Path>) -> Result<Vec<TripInfo>> {
    let path = file_path.as_ref();
    let file = File::open(path)?;
    parse_tripinfos(BufReader::new(file), &path.display().to_string())
}

pub fn parse_tripinfos<R: Read>(reader: R, source_name: &str) -> Result<Vec<TripInfo>> {
    let mut trips = Vec::new();

    for event in EventReader::new(reader) {
        if let XmlEvent::StartElement { name, attributes, .. } = event? {
            if name.local_name != "tripinfo" {
                continue;
            }

            let number = |field: &str| -> Result<f64> {
                let raw = required_attribute(&attributes, "tripinfo", field, source_name)?;
                parse_number(raw, "tripinfo", field, source_name)
            };

            trips.push(TripInfo {
                id: attribute(&attributes, "id").unwrap_or_default().to_string(),
                depart: number("depart")?,
                arrival: number("arrival")?,
                stop_time: number("stopTime")?,
                time_loss: number("timeLoss")?,
            });
        }
    }

    Ok(trips)
}
