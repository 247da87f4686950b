//! Generic inversion of iteratively defined hash functions
//!
//! This library enumerates every bounded-length input whose forward hash
//! reaches a given terminal state, by exploring the reverse-transition
//! graph breadth first with monotonicity pruning. The engine is generic
//! over any totally ordered state type; a configurable fold hash family is
//! included as the concrete caller.

pub mod config;
pub mod fold_hash;
pub mod reverse;
pub mod utils;

pub use config::Settings;
pub use reverse::{reverse_hash, InversionProblem, Preimage};

use anyhow::Result;

/// Main entry point for inverting a configured fold hash
pub fn invert_hash(settings: Settings) -> Result<Vec<Preimage>> {
    let problem = InversionProblem::new(settings)?;
    problem.solve()
}
