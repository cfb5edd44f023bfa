//! A scored population of patient-order chromosomes, and the elite it
//! currently holds.

use crate::domain::Patient;

#[derive(Debug, Clone)]
pub struct ScoredChromosome {
    pub order: Vec<Patient>,
    pub fitness: i64,
}

#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<ScoredChromosome>,
}

impl Population {
    pub fn new(members: Vec<ScoredChromosome>) -> Self {
        assert!(!members.is_empty(), "population must not be empty");
        Self { members }
    }

    pub fn members(&self) -> &[ScoredChromosome] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn elite_index(&self) -> usize {
        self.members
            .iter()
            .enumerate()
            .max_by_key(|(_, m)| m.fitness)
            .map(|(i, _)| i)
            .expect("population must not be empty")
    }

    pub fn elite(&self) -> &ScoredChromosome {
        &self.members[self.elite_index()]
    }

    pub fn mean_fitness(&self) -> f64 {
        self.members.iter().map(|m| m.fitness as f64).sum::<f64>() / self.members.len() as f64
    }

    pub fn max_fitness(&self) -> i64 {
        self.elite().fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SurgicalType;

    fn chromosome(fitness: i64) -> ScoredChromosome {
        let st = SurgicalType::new(1, 1, 1, 1);
        ScoredChromosome {
            order: vec![Patient::new(1, 1, 1, st)],
            fitness,
        }
    }

    #[test]
    fn elite_is_max_fitness() {
        let pop = Population::new(vec![chromosome(5), chromosome(9), chromosome(1)]);
        assert_eq!(pop.elite_index(), 1);
        assert_eq!(pop.max_fitness(), 9);
    }

    #[test]
    fn mean_fitness_averages() {
        let pop = Population::new(vec![chromosome(2), chromosome(4)]);
        assert_eq!(pop.mean_fitness(), 3.0);
    }
}
