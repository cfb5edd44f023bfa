//! Orchestrates the greedy placer and evolutionary optimiser into a single
//! wall-clock-bounded search over an instance.

pub mod driver;
pub mod strategies;

pub use driver::{run, run_default};
