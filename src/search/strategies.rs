//! Fixed knobs the search driver sweeps or bounds itself by.

use std::time::Duration;

/// Number of deterministic heuristics evaluated against every strategy
/// preset during the opening sweep (see `driver::run`).
pub const INITIAL_SWEEP_ORDERINGS: usize = 5;

/// Wall-clock budget for the evolutionary loop when the caller doesn't
/// override it.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(4 * 60);

pub use crate::placer::params::strategy_presets;
