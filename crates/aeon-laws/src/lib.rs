//! AEON Laws - the pure rule layer
//!
//! Everything here is a synchronous pure function of its inputs:
//! - Complexity classification of a universe state
//! - Law applicability gating by domain prefix
//! - The thermodynamic veto (ΔG = ΔH − TΔS)
//! - Precedence resolution between disagreeing domains
//! - Closed-form laws per domain, indexed by [`aeon_core::LawId`] in the registry

pub mod biology;
pub mod complexity;
pub mod constants;
pub mod ecology;
pub mod gate;
pub mod physics;
pub mod planetary;
pub mod precedence;
pub mod registry;
pub mod social;
pub mod stellar;
pub mod technology;
pub mod thermo;

pub use complexity::*;
pub use gate::*;
pub use precedence::*;
pub use registry::*;
pub use thermo::*;
