// Export modules for the binary and integration tests
pub mod api;
pub mod blocks_client;
pub mod config;
pub mod delay;
pub mod error;
pub mod gate;
pub mod models;
pub mod orchestrator;
pub mod pricing;
pub mod random;
pub mod simulator;
pub mod startup;
