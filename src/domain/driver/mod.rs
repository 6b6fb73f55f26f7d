pub mod metrics;
pub mod run_driver;
