//! Parallel search driver: an opening sweep over strategy presets and
//! deterministic heuristics, followed by a wall-clock-bounded evolutionary
//! loop over patient orderings.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::domain::{Instance, Patient};
use crate::ga::{next_generation_orders, Population, ScoredChromosome};
use crate::orderings::{self, Ordering};
use crate::placer::{place_all, strategy_presets, SolutionParameters};
use crate::result::{Result as SearchResult, SolutionRecord};
use crate::solution::Solution;

use super::strategies::{DEFAULT_BUDGET, INITIAL_SWEEP_ORDERINGS};

/// Builds a `Solution` from `order` under `params` and returns its objective
/// value alongside a detached snapshot.
fn evaluate(instance: &Instance, order: &[Patient], params: &SolutionParameters) -> (i64, SolutionRecord) {
    let mut solution = Solution::new(instance);
    place_all(&mut solution, order, params);
    (solution.value(), SolutionRecord::from_solution(&solution))
}

/// Runs the full search to completion (bounded by `budget`) and returns the
/// improvement trace plus best solution found, and the strategy preset that
/// produced it.
pub fn run(instance: &Instance, budget: Duration) -> (SearchResult, SolutionParameters) {
    let start = Instant::now();
    let mut result = SearchResult::new();
    let mut coordinator_rng = StdRng::seed_from_u64(0);

    let patients = instance.operable_patients();
    let presets = strategy_presets();
    let deterministic_orderings = orderings::generate(0);
    debug_assert_eq!(deterministic_orderings.len(), INITIAL_SWEEP_ORDERINGS);

    let mut sweep_tasks: Vec<(SolutionParameters, Ordering)> = Vec::with_capacity(presets.len() * deterministic_orderings.len());
    for &params in &presets {
        for ordering in &deterministic_orderings {
            sweep_tasks.push((params, ordering.clone()));
        }
    }

    let sweep_results: Vec<(Vec<Patient>, i64, SolutionParameters, SolutionRecord)> = sweep_tasks
        .par_iter()
        .enumerate()
        .map(|(task_index, (params, ordering))| {
            let mut worker_rng = StdRng::seed_from_u64(task_index as u64);
            let order = ordering.sort(&patients, &mut worker_rng);
            let (fitness, record) = evaluate(instance, &order, params);
            (order, fitness, *params, record)
        })
        .collect();

    log::info!(
        "heuristic sweep complete: {} strategies x {} orderings evaluated",
        presets.len(),
        deterministic_orderings.len()
    );

    let mut best_params = presets[0];
    let elapsed = start.elapsed().as_secs();
    for (_, _, params, record) in &sweep_results {
        if result.consider(record.clone(), elapsed) {
            best_params = *params;
        }
    }

    let members: Vec<ScoredChromosome> = sweep_results
        .into_iter()
        .map(|(order, fitness, _, _)| ScoredChromosome { order, fitness })
        .collect();
    let mut population = Population::new(members);

    while start.elapsed() < budget {
        let children_orders = next_generation_orders(&population, &mut coordinator_rng);

        let scored_children: Vec<(Vec<Patient>, i64, SolutionRecord)> = children_orders
            .into_par_iter()
            .map(|order| {
                let (fitness, record) = evaluate(instance, &order, &best_params);
                (order, fitness, record)
            })
            .collect();

        let elapsed = start.elapsed().as_secs();
        for (_, _, record) in &scored_children {
            result.consider(record.clone(), elapsed);
        }

        let elite = population.elite().clone();
        let mut next_members: Vec<ScoredChromosome> = scored_children
            .into_iter()
            .map(|(order, fitness, _)| ScoredChromosome { order, fitness })
            .collect();
        next_members.push(elite);
        population = Population::new(next_members);

        log::debug!(
            "generation complete: mean={:.1} max={}",
            population.mean_fitness(),
            population.max_fitness()
        );
    }

    (result, best_params)
}

/// Runs with the default wall-clock budget (4 minutes).
pub fn run_default(instance: &Instance) -> (SearchResult, SolutionParameters) {
    run(instance, DEFAULT_BUDGET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperatingRoom, SurgicalType};
    use std::time::Duration;

    #[test]
    fn run_places_every_operable_patient_when_capacity_allows() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let or1 = OperatingRoom::new(1, st);
        let or2 = OperatingRoom::new(2, st);
        let patients: Vec<Patient> = (1..=3).map(|id| Patient::new(id, id, 1, st)).collect();
        let instance = Instance::new(patients, vec![or1, or2]);

        let (result, _params) = run(&instance, Duration::from_millis(1));
        let best = result.best().expect("at least one improvement recorded");
        assert_eq!(best.assignments.len(), 3);
    }

    #[test]
    fn improvement_trace_values_are_non_decreasing() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let or_ = OperatingRoom::new(1, st);
        let patients: Vec<Patient> = (1..=2).map(|id| Patient::new(id, id, 1, st)).collect();
        let instance = Instance::new(patients, vec![or_]);

        let (result, _params) = run(&instance, Duration::from_millis(1));
        let values: Vec<i64> = result.improvements().iter().map(|i| i.objective).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}
