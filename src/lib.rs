//! RELEGATION-SIM — league standings and relegation zone simulator.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod table;
pub mod engine;
pub mod ingest;
pub mod predictions;
pub mod defaults;
pub mod report;
