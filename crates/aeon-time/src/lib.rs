//! AEON Time - cosmic clock and adaptive epoch stepping
//!
//! This crate implements simulated time control:
//! - Cosmic clock: monotonic seconds since the Big Bang
//! - Adaptive epoch clock: picks the next step from complexity and the
//!   time since the last recorded event, so quiet eras fast-forward and any
//!   emergence slows the clock down

pub mod clock;
pub mod engine;

pub use clock::*;
pub use engine::*;
