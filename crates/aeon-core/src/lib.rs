//! AEON Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the AEON law engine:
//! - Complexity levels and precedence classes
//! - Law domains and the closed law identifier set
//! - Simulation time (seconds since the Big Bang)
//! - Universe state snapshots and emergence flags
//! - Law requests, responses and conflict records
//! - Decision events and the sink they are reported to

pub mod class;
pub mod decision;
pub mod error;
pub mod event;
pub mod id;
pub mod invariants;
pub mod state;
pub mod time;

pub use class::*;
pub use decision::*;
pub use error::*;
pub use event::*;
pub use id::*;
pub use state::*;
pub use time::*;
