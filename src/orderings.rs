//! Deterministic and randomised patient orderings consumed by the placer
//! and, during evolutionary search, materialised from chromosomes.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Patient;

#[derive(Debug, Clone)]
pub enum Ordering {
    SortByPriority,
    SortByMinimumUceTime,
    SortByMaximumUceTime,
    SortByMinTimeToUceThenPriority,
    SortByMinTimeToUceThenMinUce,
    RandomOrder,
    Predefined(Vec<Patient>),
}

const SPLIT_AT: usize = 8;

/// `(priority, time_to_uce, time_to_leave, sex)`, broken descending /
/// ascending / ascending / descending in that order.
fn by_priority_desc(patients: &mut [Patient]) {
    patients.sort_by(|a, b| {
        (b.priority, a.time_to_uce(), a.time_to_leave(), b.sex)
            .cmp(&(a.priority, b.time_to_uce(), b.time_to_leave(), a.sex))
    });
}

fn by_uce_time_then_priority_asc(patients: &mut [Patient]) {
    patients.sort_by(|a, b| {
        (a.surgical_type.uce_time, a.priority).cmp(&(b.surgical_type.uce_time, b.priority))
    });
}

fn by_uce_time_then_priority_desc(patients: &mut [Patient]) {
    patients.sort_by(|a, b| {
        (b.surgical_type.uce_time, b.priority).cmp(&(a.surgical_type.uce_time, a.priority))
    });
}

fn split_by_time_to_uce(patients: &[Patient]) -> (Vec<Patient>, Vec<Patient>) {
    let mut sorted = patients.to_vec();
    sorted.sort_by_key(|p| p.time_to_uce());
    if sorted.len() <= SPLIT_AT {
        (sorted, Vec::new())
    } else {
        let rest = sorted.split_off(SPLIT_AT);
        (sorted, rest)
    }
}

impl Ordering {
    pub fn sort(&self, patients: &[Patient], rng: &mut impl Rng) -> Vec<Patient> {
        match self {
            Ordering::SortByPriority => {
                let mut v = patients.to_vec();
                by_priority_desc(&mut v);
                v
            }
            Ordering::SortByMinimumUceTime => {
                let mut v = patients.to_vec();
                by_uce_time_then_priority_asc(&mut v);
                v
            }
            Ordering::SortByMaximumUceTime => {
                let mut v = patients.to_vec();
                by_uce_time_then_priority_desc(&mut v);
                v
            }
            Ordering::SortByMinTimeToUceThenPriority => {
                let (mut head, mut tail) = split_by_time_to_uce(patients);
                by_priority_desc(&mut tail);
                head.append(&mut tail);
                head
            }
            Ordering::SortByMinTimeToUceThenMinUce => {
                let (mut head, mut tail) = split_by_time_to_uce(patients);
                by_uce_time_then_priority_asc(&mut tail);
                head.append(&mut tail);
                head
            }
            Ordering::RandomOrder => {
                let mut v = patients.to_vec();
                v.shuffle(rng);
                v
            }
            Ordering::Predefined(order) => order.clone(),
        }
    }
}

/// Yields the five deterministic orderings plus `num_random` randomised
/// copies.
pub fn generate(num_random: usize) -> Vec<Ordering> {
    let mut out = vec![
        Ordering::SortByPriority,
        Ordering::SortByMinimumUceTime,
        Ordering::SortByMaximumUceTime,
        Ordering::SortByMinTimeToUceThenMinUce,
        Ordering::SortByMinTimeToUceThenPriority,
    ];
    out.extend((0..num_random).map(|_| Ordering::RandomOrder));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SurgicalType;
    use rand::SeedableRng;

    fn patients() -> Vec<Patient> {
        let a = SurgicalType::new(1, 1, 1, 10);
        let b = SurgicalType::new(2, 1, 1, 30);
        vec![
            Patient::new(1, 5, 1, a),
            Patient::new(2, 9, 1, b),
            Patient::new(3, 1, 1, a),
        ]
    }

    #[test]
    fn sort_by_priority_is_descending() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let out = Ordering::SortByPriority.sort(&patients(), &mut rng);
        assert_eq!(out.iter().map(|p| p.priority).collect::<Vec<_>>(), vec![9, 5, 1]);
    }

    #[test]
    fn sort_by_minimum_uce_time_ascending() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let out = Ordering::SortByMinimumUceTime.sort(&patients(), &mut rng);
        assert_eq!(out[0].surgical_type.uce_time, 10);
    }

    #[test]
    fn predefined_order_returns_verbatim() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let p = patients();
        let reversed: Vec<Patient> = p.iter().rev().copied().collect();
        let out = Ordering::Predefined(reversed.clone()).sort(&p, &mut rng);
        assert_eq!(out, reversed);
    }

    #[test]
    fn generate_yields_five_deterministic_plus_n_random() {
        let orderings = generate(20);
        assert_eq!(orderings.len(), 25);
    }
}
