//! AEON Synthesis - Staged universe generation
//!
//! This crate turns a seed into a universe:
//! - Seeded random source with the distributions the stages draw from
//! - The synthesis state (atoms, stars, planets, organisms, groups, tools)
//! - Ten stages from the particle era to the first tools
//! - The pipeline that runs them in order, with checkpoints
//!
//! Every physical or biological quantity comes from the law broker; the
//! stages only decide what to ask and what to do with the answer.

pub mod naming;
pub mod pipeline;
pub mod rng;
pub mod stages;
pub mod state;

pub use pipeline::*;
pub use rng::*;
pub use stages::{Stage, StageContext, StageOutcome};
pub use state::*;
