//! Population-based evolutionary search over patient orderings.

pub mod operators;
pub mod population;

pub use operators::{crossover, mutate, next_generation_orders, roulette_selection, tournament_selection};
pub use population::{Population, ScoredChromosome};
