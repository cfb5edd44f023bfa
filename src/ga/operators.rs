//! Selection, crossover, mutation, and elitism over a scored population of
//! patient-order chromosomes.

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

use crate::domain::Patient;

use super::population::{Population, ScoredChromosome};

pub const CROSSOVER_RATE: f64 = 0.9;
pub const MUTATION_RATE: f64 = 0.1;
pub const TOURNAMENT_SIZE: usize = 3;
pub const ELITISM: usize = 1;

/// Weighted pick proportional to fitness. Fitness values must be
/// non-negative (true of the objective: `value() >= 0` always).
pub fn roulette_selection<'a>(population: &'a Population, rng: &mut impl Rng) -> &'a [Patient] {
    let weights: Vec<f64> = population.members().iter().map(|m| m.fitness as f64).collect();
    let idx = if weights.iter().all(|&w| w == 0.0) {
        rng.gen_range(0..population.len())
    } else {
        weighted_index(&weights, rng)
    };
    &population.members()[idx].order
}

fn weighted_index(weights: &[f64], rng: &mut impl Rng) -> usize {
    let total: f64 = weights.iter().sum();
    let mut pick = rng.gen_range(0.0..total);
    for (i, &w) in weights.iter().enumerate() {
        if pick < w {
            return i;
        }
        pick -= w;
    }
    weights.len() - 1
}

pub fn tournament_selection<'a>(population: &'a Population, rng: &mut impl Rng) -> &'a [Patient] {
    let contestants = (0..population.len()).choose_multiple(rng, TOURNAMENT_SIZE.min(population.len()));
    let winner = contestants
        .into_iter()
        .max_by_key(|&i| population.members()[i].fitness)
        .expect("tournament must have at least one contestant");
    &population.members()[winner].order
}

/// One-point, order-preserving crossover: `parent1[:k]` followed by the
/// elements of `parent2` not already taken, in `parent2`'s order.
pub fn crossover(parent1: &[Patient], parent2: &[Patient], rng: &mut impl Rng) -> Vec<Patient> {
    let k = rng.gen_range(0..=parent1.len());
    let head = &parent1[..k];
    let taken: HashSet<u32> = head.iter().map(|p| p.id).collect();
    let mut child: Vec<Patient> = head.to_vec();
    child.extend(parent2.iter().filter(|p| !taken.contains(&p.id)).copied());
    child
}

/// Swaps two distinct positions with probability `MUTATION_RATE`.
pub fn mutate(mut child: Vec<Patient>, rng: &mut impl Rng) -> Vec<Patient> {
    if rng.gen::<f64>() > MUTATION_RATE || child.len() < 2 {
        return child;
    }
    let indices: Vec<usize> = (0..child.len()).choose_multiple(rng, 2);
    child.swap(indices[0], indices[1]);
    child
}

/// Produces `population.len() - 1` children; the caller re-evaluates them
/// through the placer and re-inserts the elite unchanged (see
/// `search::driver`).
pub fn next_generation_orders(population: &Population, rng: &mut impl Rng) -> Vec<Vec<Patient>> {
    (1..population.len())
        .map(|_| {
            let p1 = roulette_selection(population, rng);
            let p2 = tournament_selection(population, rng);
            let child = crossover(p1, p2, rng);
            mutate(child, rng)
        })
        .collect()
}
