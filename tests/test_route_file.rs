use parking_scenario_gen::domain::scenario::vehicle::{Scenario, Vehicle};
use parking_scenario_gen::domain::utils::id::{EdgeId, ParkingAreaId, VehicleId};
use parking_scenario_gen::writer::route_file::{EXIT_ROUTE_ID, render_route_file, write_route_file};
use std::collections::BTreeMap;
use std::fs;
use xml::reader::{EventReader, XmlEvent};

fn vehicle(id: &str, depart: f64, route: &[&str], area: &str, stop_duration: f64) -> Vehicle {
    let route: Vec<EdgeId> = route.iter().map(|e| EdgeId::new(*e)).collect();
    Vehicle {
        id: VehicleId::new(id),
        parking_area: ParkingAreaId::new(area),
        entry_edge: route[route.len() - 2].clone(),
        route,
        depart,
        estimated_arrival: depart + 10.0,
        stop_duration,
        scheduled_exit: depart + 10.0 + stop_duration,
    }
}

fn sample_scenario() -> Scenario {
    Scenario {
        vehicles: vec![vehicle("veh1", 3.0, &["E0", "E1", "E9"], "pa_0", 120.5), vehicle("veh0", 12.5, &["E0", "E1", "E2", "E9"], "pa_1", 7.25)],
        assignments: BTreeMap::new(),
        synchronization_anchor: 50.0,
        target_count: 2,
        seed: Some(1),
    }
}

/// `(element name, attributes)` of every start element in document order.
fn elements(xml: &[u8]) -> Vec<(String, BTreeMap<String, String>)> {
    EventReader::new(xml)
        .into_iter()
        .filter_map(|event| match event.unwrap() {
            XmlEvent::StartElement { name, attributes, .. } => {
                let attributes = attributes.into_iter().map(|a| (a.name.local_name, a.value)).collect();
                Some((name.local_name, attributes))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn test_route_file_structure() {
    let rendered = render_route_file(&sample_scenario(), &EdgeId::new("E9")).unwrap();
    let text = String::from_utf8(rendered.clone()).unwrap();

    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(text.contains("xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\""));
    assert!(text.contains("xsi:noNamespaceSchemaLocation=\"http://sumo.dlr.de/xsd/routes_file.xsd\""));
    assert!(text.ends_with('\n'));

    let names: Vec<String> = elements(&rendered).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["routes", "route", "vehicle", "route", "stop", "vehicle", "route", "stop"]);
}

#[test]
fn test_route_file_attributes() {
    let rendered = render_route_file(&sample_scenario(), &EdgeId::new("E9")).unwrap();
    let elements = elements(&rendered);

    assert_eq!(elements[1].1["id"], EXIT_ROUTE_ID);
    assert_eq!(elements[1].1["edges"], "E9");

    assert_eq!(elements[2].1["id"], "veh1");
    assert_eq!(elements[2].1["depart"], "3.00");
    assert_eq!(elements[3].1["edges"], "E0 E1 E9");
    assert_eq!(elements[4].1["parkingArea"], "pa_0");
    assert_eq!(elements[4].1["duration"], "120.50");

    assert_eq!(elements[5].1["id"], "veh0");
    assert_eq!(elements[5].1["depart"], "12.50");
    assert_eq!(elements[6].1["edges"], "E0 E1 E2 E9");
    assert_eq!(elements[7].1["duration"], "7.25");
}

#[test]
fn test_route_file_is_written_to_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run001").join("scenario.rou.xml");

    write_route_file(&path, &sample_scenario(), &EdgeId::new("E9")).unwrap();

    let written = fs::read(&path).unwrap();
    assert_eq!(written, render_route_file(&sample_scenario(), &EdgeId::new("E9")).unwrap());

    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().filter_map(|e| e.ok()).filter(|e| e.file_name().to_string_lossy().ends_with(".tmp")).collect();
    assert!(leftovers.is_empty());
}
