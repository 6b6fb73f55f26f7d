pub mod network_graph;
pub mod route_resolver;
