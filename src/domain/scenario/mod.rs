pub mod config;
pub mod edge_bias;
pub mod generator;
pub mod parking_area;
pub mod vehicle;
