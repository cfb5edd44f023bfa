//! Three-phase greedy placement engine.
//!
//! Mirrors the candidate/cursor structure of a classic earliest-start
//! scheduler: for each patient, gather feasible room/interval candidates,
//! score every reachable start time with the active `Criterion`, and commit
//! the winner before moving to the next patient.

use crate::criteria::Criterion;
use crate::domain::surgical_type::URPA_MAX_WAITING_TIME;
use crate::domain::Patient;
use crate::solution::Solution;

use super::params::{
    SolutionParameters, END_LOAD_MIN_ENDS, END_LOAD_UCE_TIMES, FRONT_LOAD_MIN_START,
    PHASE_PLACEMENT_CAP,
};

/// Attempts to place a single patient under the given criterion kind.
/// Returns `true` if a feasible assignment was found and committed.
fn place_patient(solution: &mut Solution, patient: &Patient, criterion_kind: crate::criteria::CriterionKind) -> bool {
    let ors = solution.find_available_ors(patient);
    let uces = solution.find_available_uces(patient);

    let mut criterion = Criterion::new(criterion_kind);

    for sex in patient.sex_order() {
        for slot in &ors {
            let operation_time = patient.surgical_type.operation_time;
            let urpa_time = patient.surgical_type.urpa_time;
            let min_start = slot.free.lower() + operation_time + urpa_time;
            let max_start = slot.free.upper() + urpa_time + URPA_MAX_WAITING_TIME + 1;
            let late_cutoff = min_start + URPA_MAX_WAITING_TIME + 1;

            for uce_slot in &uces {
                if !solution.sex_lock(uce_slot.room.id).matches(sex) {
                    continue;
                }
                if uce_slot.free.lower() > max_start {
                    continue;
                }
                let scan_start = min_start.max(uce_slot.free.lower());
                for t in scan_start..max_start {
                    if !uce_slot.free.can_fit(t, patient.surgical_type.uce_time) {
                        continue;
                    }
                    let op_start = if t < late_cutoff {
                        slot.free.lower()
                    } else {
                        slot.free.upper() - operation_time
                    };
                    let candidate = crate::domain::Assignment::new(
                        *patient,
                        slot.room,
                        op_start,
                        uce_slot.room,
                        t,
                    );
                    criterion.evaluate(candidate, uce_slot.free);
                }
            }
        }
        if !criterion.is_first() {
            break;
        }
    }

    if let Some(best) = criterion.into_best() {
        solution.assign(best);
        true
    } else {
        false
    }
}

/// Runs the three placement phases over `order`, mutating `solution` in
/// place. `order` need not contain every operable patient — patients this
/// run cannot place are simply skipped, never treated as an error.
pub fn place_all(solution: &mut Solution, order: &[Patient], params: &SolutionParameters) {
    let window = solution.instance().uce_window();

    if params.assign_last {
        let uce_times: &[u32] = if params.sort_by_uce { &END_LOAD_UCE_TIMES } else { &[0] };
        let min_ends: &[u32] = if params.sort_by_maximum { &END_LOAD_MIN_ENDS } else { &[144] };
        let mut placed_here = 0usize;
        'uce_times: for &uce_time in uce_times {
            for &min_end in min_ends {
                for patient in order {
                    if placed_here >= PHASE_PLACEMENT_CAP {
                        break 'uce_times;
                    }
                    if solution.is_placed(patient.id) {
                        continue;
                    }
                    if uce_time != 0 && patient.surgical_type.uce_time != uce_time {
                        continue;
                    }
                    let criterion = crate::criteria::CriterionKind::MaxStart { upper_bound: min_end };
                    if place_patient(solution, patient, criterion) {
                        placed_here += 1;
                    }
                }
            }
        }
    }

    if params.assign_beginning {
        let mut placed_here = 0usize;
        for patient in order {
            if placed_here >= PHASE_PLACEMENT_CAP {
                break;
            }
            if solution.is_placed(patient.id) {
                continue;
            }
            let criterion = crate::criteria::CriterionKind::MinStart { lower_bound: FRONT_LOAD_MIN_START };
            if place_patient(solution, patient, criterion) {
                placed_here += 1;
            }
        }
    }

    for patient in order {
        if solution.is_placed(patient.id) {
            continue;
        }
        let criterion = params.default_criterion.instantiate(window);
        place_patient(solution, patient, criterion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Instance, OperatingRoom, SurgicalType};
    use crate::placer::params::DefaultCriterionKind;

    fn default_params() -> SolutionParameters {
        SolutionParameters::new(false, false, false, false, DefaultCriterionKind::MinStart)
    }

    #[test]
    fn single_patient_is_placed() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let or_ = OperatingRoom::new(1, st);
        let p = Patient::new(1, 5, 1, st);
        let instance = Instance::new(vec![p], vec![or_]);
        let mut sol = Solution::new(&instance);
        place_all(&mut sol, &[p], &default_params());
        assert_eq!(sol.number_operated_patients(), 1);
        let a = &sol.assignments()[0];
        assert_eq!(a.operation_interval.lower(), 8);
    }

    #[test]
    fn patient_with_no_matching_or_is_skipped_silently() {
        let st1 = SurgicalType::new(1, 2, 2, 24);
        let st2 = SurgicalType::new(2, 2, 2, 24);
        let or_ = OperatingRoom::new(1, st1);
        let p = Patient::new(1, 5, 1, st2);
        let instance = Instance::new(vec![p], vec![or_]);
        let mut sol = Solution::new(&instance);
        // find_available_ors filters by feasible_operating_rooms, which is empty for st2
        place_all(&mut sol, &[p], &default_params());
        assert_eq!(sol.number_operated_patients(), 0);
    }

    #[test]
    fn two_same_sex_patients_share_uce_room() {
        let st = SurgicalType::new(1, 2, 2, 48);
        let or_ = OperatingRoom::new(1, st);
        let p1 = Patient::new(1, 3, 1, st);
        let p2 = Patient::new(2, 2, 1, st);
        let instance = Instance::new(vec![p1, p2], vec![or_]);
        let mut sol = Solution::new(&instance);
        place_all(&mut sol, &[p1, p2], &default_params());
        assert_eq!(sol.number_operated_patients(), 2);
    }

    /// When the winning candidate's UCE start lands at or past the OR's
    /// `late_cutoff`, the operation itself is pushed back to
    /// `or_int.upper - operation_time` rather than started at `or_int.lower`.
    #[test]
    fn late_candidate_pushes_operation_start_back() {
        let st = SurgicalType::new(1, 2, 2, 2);
        let or_ = OperatingRoom::new(1, st);
        let patient = Patient::new(1, 1, 1, st);
        let instance = Instance::new(vec![patient], vec![or_]);
        let mut sol = Solution::new(&instance);

        // Fill days 2-4 of the room entirely so only day 1 ([8,20)) remains
        // free for the real patient.
        let filler_st = SurgicalType::new(1, 11, 0, 0);
        let filler = Patient::new(99, 1, 1, filler_st);
        let uce = instance.uce_rooms[1];
        for day_start in [32, 56, 80] {
            sol.assign(crate::domain::Assignment::new(filler, or_, day_start, uce, 0));
        }

        let criterion = crate::criteria::CriterionKind::MaxStart { upper_bound: 30 };
        assert!(place_patient(&mut sol, &patient, criterion));

        let a = &sol.assignments().last().unwrap();
        assert_eq!(a.operation_interval.lower(), 18);
        assert_eq!(a.uce_interval.lower(), 34);
    }

    #[test]
    fn opposite_sex_single_room_places_only_one() {
        let st = SurgicalType::new(1, 2, 2, 144);
        let or1 = OperatingRoom::new(1, st);
        let or2 = OperatingRoom::new(2, st);
        let p1 = Patient::new(1, 3, 1, st);
        let p2 = Patient::new(2, 2, 2, st);
        let mut instance = Instance::new(vec![p1, p2], vec![or1, or2]);
        instance.uce_rooms.truncate(1);
        let mut sol = Solution::new(&instance);
        place_all(&mut sol, &[p1, p2], &default_params());
        assert_eq!(sol.number_operated_patients(), 1);
    }
}
