mod common;

use common::{EXIT_EDGE, START_EDGE, edge, edges, fixture_catalog, fixture_graph};
use parking_scenario_gen::api::catalog_dto::{CatalogEntryDto, RouteCatalogDto};
use parking_scenario_gen::domain::catalog::route_catalog::{CatalogEntry, RouteCatalog};
use parking_scenario_gen::domain::utils::id::ParkingAreaId;
use parking_scenario_gen::error::Error;
use parking_scenario_gen::loader::parking_parser::parse_parking_areas;
use std::fs;

#[test]
fn test_parking_areas_are_grouped_by_edge() {
    let layout = parse_parking_areas(common::PARKING_XML.as_bytes(), "fixture").unwrap();

    assert_eq!(layout.parking_edges, edges(&["E1", "E2", "E3", "E5"]));
    assert_eq!(layout.areas_by_edge[&edge("E3")], vec![ParkingAreaId::new("pa_0"), ParkingAreaId::new("pa_1")]);
}

#[test]
fn test_parking_area_without_lane_is_rejected() {
    let xml = r#"<additional><parkingArea id="pa_0"/></additional>"#;
    assert!(matches!(parse_parking_areas(xml.as_bytes(), "broken"), Err(Error::MalformedInput { .. })));
}

#[test]
fn test_catalog_contains_every_reachable_parking_edge() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);

    assert_eq!(catalog.len(), 4);
    let pa_0 = ParkingAreaId::new("pa_0");
    assert_eq!(catalog.entry_edges_for(&pa_0), vec![&edge("E1"), &edge("E2"), &edge("E3")]);

    let entry = catalog.get(&edge("E2"), &pa_0).unwrap();
    assert_eq!(entry.route, edges(&["E0", "E1", "E2", "E9"]));
    assert_eq!(entry.route_to_entry(), edges(&["E0", "E1", "E2"]).as_slice());
}

#[test]
fn test_unreachable_parking_edge_is_omitted() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);

    assert!(catalog.get(&edge("E5"), &ParkingAreaId::new("pa_dead")).is_none());
    assert!(!catalog.parking_areas().contains(&ParkingAreaId::new("pa_dead")));
}

#[test]
fn test_every_route_starts_at_start_and_ends_at_exit() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);

    for entry in catalog.iter() {
        assert_eq!(entry.route.first(), Some(&edge(START_EDGE)));
        assert_eq!(entry.route.last(), Some(&edge(EXIT_EDGE)));
        assert!(entry.entry_position().is_some());
        assert!(graph.is_contiguous(&entry.route), "route via {} is not contiguous", entry.entry_edge);
    }
}

#[test]
fn test_catalog_file_format() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.json");

    catalog.save(&path).unwrap();
    let contents = fs::read_to_string(&path).unwrap();

    assert!(contents.contains("  \"E1_pa_0\": {\n    \"via\": \"E0 E1 E9\",\n    \"parking\": \"pa_0\"\n  }"));
    assert!(contents.find("\"E1_pa_0\"").unwrap() < contents.find("\"E3_pa_1\"").unwrap());
    assert!(contents.ends_with("}\n"));
}

#[test]
fn test_catalog_survives_save_and_load() {
    let graph = fixture_graph();
    let catalog = fixture_catalog(&graph);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("routes.json");

    catalog.save(&path).unwrap();
    let loaded = RouteCatalog::load(&path).unwrap();

    assert_eq!(loaded.len(), catalog.len());
    for entry in catalog.iter() {
        assert_eq!(loaded.get(&entry.entry_edge, &entry.parking_area), Some(entry));
    }
}

#[test]
fn test_parking_area_ids_with_underscores_are_recovered() {
    let dto: RouteCatalogDto = [(
        "-E12_pa_north_2".to_string(),
        CatalogEntryDto { via: "E0 -E12 E9".to_string(), parking: "pa_north_2".to_string() },
    )]
    .into_iter()
    .collect();

    let catalog = RouteCatalog::try_from(dto).unwrap();
    let entry = catalog.get(&edge("-E12"), &ParkingAreaId::new("pa_north_2")).unwrap();
    assert_eq!(entry.entry_edge, edge("-E12"));
}

#[test]
fn test_key_not_matching_parking_area_is_rejected() {
    let dto: RouteCatalogDto =
        [("E1_pa_x".to_string(), CatalogEntryDto { via: "E0 E1 E9".to_string(), parking: "pa_0".to_string() })].into_iter().collect();

    assert!(matches!(RouteCatalog::try_from(dto), Err(Error::MalformedInput { .. })));
}

#[test]
fn test_entry_edge_must_be_on_route() {
    let mut catalog = RouteCatalog::new();
    let entry = CatalogEntry { entry_edge: edge("E7"), parking_area: ParkingAreaId::new("pa_0"), route: edges(&["E0", "E9"]) };

    assert!(catalog.insert(entry).is_err());
    assert!(catalog.is_empty());
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(RouteCatalog::load(dir.path().join("absent.json")), Err(Error::IoError(_))));
}
