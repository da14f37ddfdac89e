//! AEON Runtime - Universe orchestration
//!
//! This crate wires the engine together:
//! 1. Build the broker (explicitly, shared by `Arc`)
//! 2. Run synthesis from the seed
//! 3. Seed molecular clouds as density agents
//! 4. Tick: adaptive step, agent pre-fetch, synchronous arbitration
//! 5. Feed star formation back into the event log
//!
//! Also carries configuration loading and logging initialisation for the
//! `genesis` binary.

pub mod config;
pub mod observability;
pub mod universe;

pub use config::*;
pub use observability::*;
pub use universe::*;
