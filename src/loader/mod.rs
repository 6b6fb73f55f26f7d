pub mod network_parser;
pub mod parking_parser;
pub mod parser;
pub mod tripinfo_parser;
