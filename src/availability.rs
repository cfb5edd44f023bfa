//! Per-room availability queries, derived from an instance's fixed windows
//! and a solution's current assignments.

use crate::domain::uce_room::SexLock;
use crate::domain::{Assignment, Instance};
use crate::interval_set::IntervalSet;

/// Free time remaining in `room`, after subtracting the operation-plus-
/// cleaning span of every assignment already placed there.
pub fn availability_or(instance: &Instance, assignments_by_or: &[Assignment]) -> IntervalSet {
    let mut availability: IntervalSet = instance.operation_window().clone();
    for assignment in assignments_by_or {
        availability = availability.difference(&IntervalSet::from(
            assignment.operation_cleaning_interval,
        ));
    }
    availability
}

/// Free time remaining in `uce_room` for a patient of `sex`: the instance's
/// UCE window minus any interval already occupied by the opposite sex,
/// minus any interval where two same-sex patients already overlap (the
/// capacity guard, assuming `capacity == 2`).
pub fn availability_ur(instance: &Instance, assignments_by_ur: &[Assignment], sex: u8) -> IntervalSet {
    let mut availability = IntervalSet::from(instance.uce_window());

    for assignment in assignments_by_ur {
        if assignment.patient.sex != sex {
            availability = availability.difference(&IntervalSet::from(assignment.uce_interval));
        }
    }

    for (i, a1) in assignments_by_ur.iter().enumerate() {
        if a1.patient.sex != sex {
            continue;
        }
        for a2 in &assignments_by_ur[i + 1..] {
            if a2.patient.sex != sex {
                continue;
            }
            if let Some(overlap) = a1.uce_interval.intersection(&a2.uce_interval) {
                availability = availability.difference(&IntervalSet::from(overlap));
            }
        }
    }

    availability
}

/// Whether `room`'s sex lock permits a patient of `sex`.
pub fn uce_room_accepts(lock: &SexLock, sex: u8) -> bool {
    lock.matches(sex)
}
