//! AEON Test Harness - Determinism runs and law fuzzing
//!
//! This crate provides:
//! - Multi-seed universe simulation (determinism, monotonic complexity)
//! - Broker fuzzing against the decision invariants
//! - Property tests for the pure rule layer
//! - End-to-end scenarios across synthesis, agents and runtime

pub mod integration;
pub mod law_fuzzer;
pub mod universe_simulator;

pub use integration::*;
pub use law_fuzzer::*;
pub use universe_simulator::*;
