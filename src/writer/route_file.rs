use std::path::Path;
use xml::common::XmlVersion;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

use crate::domain::scenario::vehicle::{Scenario, Vehicle};
use crate::domain::utils::id::EdgeId;
use crate::error::Result;
use crate::loader::parser::write_atomically;

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const ROUTES_SCHEMA: &str = "http://sumo.dlr.de/xsd/routes_file.xsd";
pub const EXIT_ROUTE_ID: &str = "exitRoute";

/// Renders the scenario as a simulator route file.
///
/// Vehicles are written in the scenario's order (by departure time); times use two
/// decimals.
pub fn render_route_file(scenario: &Scenario, exit_edge: &EdgeId) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = EmitterConfig::new().perform_indent(true).indent_string("  ").create_writer(&mut buffer);

        writer.write(XmlEvent::StartDocument { version: XmlVersion::Version10, encoding: Some("UTF-8"), standalone: None })?;
        writer.write(XmlEvent::start_element("routes").ns("xsi", XSI_NAMESPACE).attr("xsi:noNamespaceSchemaLocation", ROUTES_SCHEMA))?;

        writer.write(XmlEvent::start_element("route").attr("id", EXIT_ROUTE_ID).attr("edges", exit_edge.as_str()))?;
        writer.write(XmlEvent::end_element())?;

        for vehicle in &scenario.vehicles {
            write_vehicle(&mut writer, vehicle)?;
        }

        writer.write(XmlEvent::end_element())?;
    }
    buffer.push(b'\n');

    Ok(buffer)
}

fn write_vehicle<W: std::io::Write>(writer: &mut EventWriter<W>, vehicle: &Vehicle) -> Result<()> {
    let depart = format!("{:.2}", vehicle.depart);
    let edges = vehicle.route.iter().map(EdgeId::as_str).collect::<Vec<_>>().join(" ");
    let duration = format!("{:.2}", vehicle.stop_duration);

    writer.write(XmlEvent::start_element("vehicle").attr("id", vehicle.id.as_str()).attr("depart", &depart))?;

    writer.write(XmlEvent::start_element("route").attr("edges", &edges))?;
    writer.write(XmlEvent::end_element())?;

    writer.write(XmlEvent::start_element("stop").attr("parkingArea", vehicle.parking_area.as_str()).attr("duration", &duration))?;
    writer.write(XmlEvent::end_element())?;

    writer.write(XmlEvent::end_element())?;
    Ok(())
}

/// Serializes the whole scenario in memory and then replaces `file_path`.
pub fn write_route_file(file_path: impl AsRef<Path>, scenario: &Scenario, exit_edge: &EdgeId) -> Result<()> {
    let contents = render_route_file(scenario, exit_edge)?;
    write_atomically(file_path.as_ref(), &contents)?;

    log::info!("Route file with {} vehicles written to '{}'.", scenario.len(), file_path.as_ref().display());
    Ok(())
}
