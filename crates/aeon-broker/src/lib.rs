//! AEON Broker - the single entry point for law questions
//!
//! This crate implements:
//! - The [`DomainRegulator`] contract, async so regulators may later live
//!   out of process
//! - Seven reference regulators (entropy, physics, biology, ecology, social,
//!   technology, planetary), all synchronous and pure underneath
//! - The [`Broker`]: thermodynamic veto, gated fan-out, conflict detection and
//!   precedence resolution, non-finite answer suppression
//! - Decision sinks for structured logging

pub mod broker;
pub mod regulator;
pub mod regulators;
pub mod sink;

pub use broker::*;
pub use regulator::*;
pub use regulators::*;
pub use sink::*;
