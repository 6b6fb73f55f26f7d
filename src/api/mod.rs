pub mod catalog_dto;
pub mod config_dto;
