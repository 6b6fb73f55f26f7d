use std::fs::File;
use std::io::BufReader;
use std::sync::Mutex;
use xml::reader::{EventReader, XmlEvent};
use xml::writer::{EmitterConfig, XmlEvent as WriteEvent};

use crate::domain::simulator::simulator::{SimulationRequest, TrafficSimulator};
use crate::error::Result;
use crate::loader::parser::{attribute, parse_number, write_atomically};

/// Simulator stand-in that "drives" every vehicle of the route file with a fixed
/// travel time and time loss and records the requests it received.
#[derive(Debug)]
pub struct MockSimulator {
    pub travel_time: f64,
    pub time_loss: f64,
    pub requests: Mutex<Vec<SimulationRequest>>,
}

impl MockSimulator {
    pub fn new(travel_time: f64, time_loss: f64) -> MockSimulator {
        MockSimulator { travel_time, time_loss, requests: Mutex::new(Vec::new()) }
    }

    pub fn received_requests(&self) -> Vec<SimulationRequest> {
        self.requests.lock().map(|requests| requests.clone()).unwrap_or_default()
    }
}

/// `(id, depart, stop duration)` of every vehicle in a route file.
fn read_vehicles(request: &SimulationRequest) -> Result<Vec<(String, f64, f64)>> {
    let source_name = request.route_file.display().to_string();
    let reader = EventReader::new(BufReader::new(File::open(&request.route_file)?));
    let mut vehicles = Vec::new();

    for event in reader {
        if let XmlEvent::StartElement { name, attributes, .. } = event? {
            match name.local_name.as_str() {
                "vehicle" => {
                    let id = attribute(&attributes, "id").unwrap_or_default().to_string();
                    let depart = parse_number(attribute(&attributes, "depart").unwrap_or("0"), "vehicle", "depart", &source_name)?;
                    vehicles.push((id, depart, 0.0));
                }
                "stop" => {
                    if let Some(last) = vehicles.last_mut() {
                        last.2 = parse_number(attribute(&attributes, "duration").unwrap_or("0"), "stop", "duration", &source_name)?;
                    }
                }
                _ => {}
            }
        }
    }

    Ok(vehicles)
}

impl TrafficSimulator for MockSimulator {
    fn run(&self, request: &SimulationRequest) -> Result<()> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let vehicles = read_vehicles(request)?;
        let mut buffer = Vec::new();
        {
            let mut writer = EmitterConfig::new().perform_indent(true).create_writer(&mut buffer);
            writer.write(WriteEvent::start_element("tripinfos"))?;

            for (id, depart, stop_time) in vehicles {
                let depart_attr = format!("{:.2}", depart);
                let arrival = format!("{:.2}", depart + stop_time + self.travel_time);
                let stop_attr = format!("{:.2}", stop_time);
                let loss = format!("{:.2}", self.time_loss);

                writer.write(
                    WriteEvent::start_element("tripinfo")
                        .attr("id", &id)
                        .attr("depart", &depart_attr)
                        .attr("arrival", &arrival)
                        .attr("stopTime", &stop_attr)
                        .attr("timeLoss", &loss),
                )?;
                writer.write(WriteEvent::end_element())?;
            }

            writer.write(WriteEvent::end_element())?;
        }

        write_atomically(&request.tripinfo_output, &buffer)
    }
}
