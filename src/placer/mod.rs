//! The constructive greedy placer: given a patient order and a strategy,
//! builds a feasible `Solution`.

pub mod engine;
pub mod params;

pub use engine::place_all;
pub use params::{strategy_presets, DefaultCriterionKind, SolutionParameters};
