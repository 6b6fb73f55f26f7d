use crate::domain::catalog::route_catalog::{CatalogEntry, RouteCatalog};
use crate::domain::network::network_graph::NetworkGraph;
use crate::domain::network::route_resolver::resolve_parking_route;
use crate::domain::utils::id::EdgeId;
use crate::error::Result;
use crate::loader::parking_parser::ParkingLayout;

/// Resolves a full route for every parking edge and records it for each parking
/// area on that edge. Edges without a route to the parking edge or on to the exit
/// are left out of the catalog.
pub fn build_route_catalog(graph: &NetworkGraph, layout: &ParkingLayout, start: &EdgeId, exit: &EdgeId) -> Result<RouteCatalog> {
    let mut catalog = RouteCatalog::new();
    let mut omitted = 0usize;

    for parking_edge in &layout.parking_edges {
        let Some(path) = resolve_parking_route(graph, start, parking_edge, exit) else {
            log::warn!("No route {} -> {} -> {}; parking edge omitted from catalog.", start, parking_edge, exit);
            omitted += 1;
            continue;
        };

        let areas = layout.areas_by_edge.get(parking_edge).map(Vec::as_slice).unwrap_or(&[]);
        for area in areas {
            catalog.insert(CatalogEntry { entry_edge: parking_edge.clone(), parking_area: area.clone(), route: path.edges.clone() })?;
        }

        log::debug!("Resolved route via {} ({} edges, {:.2} m).", parking_edge, path.edges.len(), path.weight);
    }

    log::info!("Route catalog built: {} entries, {} parking edges omitted.", catalog.len(), omitted);

    Ok(catalog)
}
