use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xml::reader::{EventReader, XmlEvent};

use crate::domain::utils::id::EdgeId;
use crate::error::{Error, Result};
use crate::loader::parser::{attribute, parse_number, required_attribute};

/// Raw content of a network description: edge lengths and directed
/// edge-to-edge connections in document order.
#[derive(Debug, Clone, Default)]
pub struct NetworkDescription {
    pub edge_lengths: HashMap<EdgeId, f64>,
    pub connections: Vec<(EdgeId, EdgeId)>,
}

/// Edge that is currently open in the document, waiting for its lanes.
struct PendingEdge {
    id: EdgeId,
    explicit_length: Option<f64>,
    lane_length_sum: f64,
}

pub fn parse_network_file(file_path: impl AsRef<Path>) -> Result<NetworkDescription> {
    let path = file_path.as_ref();
    let file = File::open(path)?;
    let description = parse_network(BufReader::new(file), &path.display().to_string())?;

    log::info!(
        "Loaded network '{}': {} edges, {} connections.",
        path.display(),
        description.edge_lengths.len(),
        description.connections.len()
    );

    Ok(description)
}

/// Parses `<edge>`, `<lane>` and `<connection>` elements.
///
/// An edge's explicit `length` wins; otherwise its length is the sum of its
/// lanes' lengths (lanes without a length count as zero). Connections missing
/// either endpoint are skipped.
pub fn parse_network<R: Read>(reader: R, source_name: &str) -> Result<NetworkDescription> {
    let mut description = NetworkDescription::default();
    let mut pending: Option<PendingEdge> = None;

    for event in EventReader::new(reader) {
        match event? {
            XmlEvent::StartElement { name, attributes, .. } => match name.local_name.as_str() {
                "edge" => {
                    let id = required_attribute(&attributes, "edge", "id", source_name)?;
                    let explicit_length = match attribute(&attributes, "length") {
                        Some(raw) => Some(non_negative(parse_number(raw, "edge", "length", source_name)?, id, source_name)?),
                        None => None,
                    };
                    pending = Some(PendingEdge { id: EdgeId::new(id), explicit_length, lane_length_sum: 0.0 });
                }
                "lane" => {
                    if let Some(edge) = pending.as_mut() {
                        if let Some(raw) = attribute(&attributes, "length") {
                            let length = parse_number(raw, "lane", "length", source_name)?;
                            edge.lane_length_sum += non_negative(length, edge.id.as_str(), source_name)?;
                        }
                    }
                }
                "connection" => {
                    if let (Some(from), Some(to)) = (attribute(&attributes, "from"), attribute(&attributes, "to")) {
                        if !from.is_empty() && !to.is_empty() {
                            description.connections.push((EdgeId::new(from), EdgeId::new(to)));
                        }
                    }
                }
                _ => {}
            },
            XmlEvent::EndElement { name } if name.local_name == "edge" => {
                if let Some(edge) = pending.take() {
                    let length = edge.explicit_length.unwrap_or(edge.lane_length_sum);
                    description.edge_lengths.insert(edge.id, length);
                }
            }
            _ => {}
        }
    }

    Ok(description)
}

fn non_negative(length: f64, edge: &str, source_name: &str) -> Result<f64> {
    if length < 0.0 || !length.is_finite() {
        return Err(Error::malformed(source_name, format!("edge '{}' has an invalid length {}", edge, length)));
    }
    Ok(length)
}
