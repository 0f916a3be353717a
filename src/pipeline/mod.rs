// src/pipeline/mod.rs

//! Refresh pipeline: per-category fetch→extract→fallback and the
//! scheduler driving periodic and on-demand cycles.

pub mod refresh;
pub mod scheduler;

pub use refresh::{RefreshOutcome, run_refresh};
pub use scheduler::RefreshScheduler;
