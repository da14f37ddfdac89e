//! AEON Agent - Async-gated decisions
//!
//! Goal arbitration is synchronous, the broker is not. Each tick:
//! 1. Every agent pre-fetches the broker answers its evaluators need
//! 2. Answers (or safe defaults on failure) land in per-agent caches
//! 3. Arbitration runs synchronously, reading only the caches
//!
//! No tick waits on the broker longer than the pre-fetch timeout, and what
//! an evaluator reads is at most one tick stale.

pub mod cache;
pub mod density;
pub mod driver;
pub mod goal;

pub use cache::*;
pub use density::*;
pub use driver::*;
pub use goal::*;
