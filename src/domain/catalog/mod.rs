pub mod catalog_builder;
pub mod route_catalog;
