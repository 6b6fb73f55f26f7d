pub mod simulator;
pub mod simulator_mock;
