pub mod catalog;
pub mod driver;
pub mod network;
pub mod scenario;
pub mod simulator;
pub mod utils;
