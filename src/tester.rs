//! Independent post-hoc validator: reconstructs assignments purely from a
//! parsed instance file and a parsed solution file, never touching the
//! in-memory `Solution` the search driver built, so a bug in the writer or
//! in the driver's own bookkeeping cannot hide behind a tautological
//! self-check.

use thiserror::Error;

use crate::domain::{Assignment, Instance};
use crate::io::solution_file::ParsedSolutionFile;

const MAX_CPU_SECONDS: u64 = 300;

#[derive(Debug, Error)]
pub enum TesterError {
    #[error("solution references unknown patient id {0}")]
    UnknownPatient(u32),
    #[error("solution references unknown operating room id {0}")]
    UnknownOperatingRoom(u32),
    #[error("solution references unknown uce room id {0}")]
    UnknownUceRoom(u32),
    #[error("assignment columns have mismatched lengths")]
    ColumnLengthMismatch,
    #[error("solution file declares no improvements")]
    NoImprovements,
}

pub struct Check {
    pub name: &'static str,
    pub passed: bool,
    pub message: String,
}

pub struct Report {
    pub checks: Vec<Check>,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

fn format_check(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "INCORRECT"
    }
}

/// Rebuilds the committed `Assignment`s from a parsed instance and a parsed
/// solution file's five columns, by id lookup alone.
pub fn reconstruct_assignments(
    instance: &Instance,
    parsed: &ParsedSolutionFile,
) -> Result<Vec<Assignment>, TesterError> {
    let n = parsed.patient_ids.len();
    if parsed.or_ids.len() != n
        || parsed.op_starts.len() != n
        || parsed.uce_ids.len() != n
        || parsed.uce_starts.len() != n
    {
        return Err(TesterError::ColumnLengthMismatch);
    }

    (0..n)
        .map(|i| {
            let patient_id = parsed.patient_ids[i];
            let or_id = parsed.or_ids[i];
            let uce_id = parsed.uce_ids[i];
            let patient = instance
                .patients
                .iter()
                .find(|p| p.id == patient_id)
                .copied()
                .ok_or(TesterError::UnknownPatient(patient_id))?;
            let operating_room = instance
                .operating_rooms
                .iter()
                .find(|r| r.id == or_id)
                .copied()
                .ok_or(TesterError::UnknownOperatingRoom(or_id))?;
            let uce_room = instance
                .uce_rooms
                .iter()
                .find(|r| r.id == uce_id)
                .copied()
                .ok_or(TesterError::UnknownUceRoom(uce_id))?;
            Ok(Assignment::new(
                patient,
                operating_room,
                parsed.op_starts[i],
                uce_room,
                parsed.uce_starts[i],
            ))
        })
        .collect()
}

fn patient_in_feasible_operating_room(assignments: &[Assignment]) -> Check {
    let passed = assignments
        .iter()
        .all(|a| a.patient.surgical_type.id == a.operating_room.surgical_type.id);
    Check {
        name: "patient_in_feasible_operating_room",
        message: format!("Every patient is operated in a room of its surgical type: {}", format_check(passed)),
        passed,
    }
}

fn pairs_in_room<'a>(
    assignments: &'a [Assignment],
    room_id: u32,
    key: impl Fn(&Assignment) -> u32 + 'a,
) -> impl Iterator<Item = (&'a Assignment, &'a Assignment)> + 'a {
    let in_room: Vec<&Assignment> = assignments.iter().filter(move |a| key(a) == room_id).collect();
    (0..in_room.len()).flat_map(move |i| {
        let in_room = in_room.clone();
        ((i + 1)..in_room.len()).map(move |j| (in_room[i], in_room[j]))
    })
}

fn no_overlap_patients_in_same_operating_room(instance: &Instance, assignments: &[Assignment]) -> Check {
    let passed = instance.operating_rooms.iter().all(|room| {
        pairs_in_room(assignments, room.id, |a| a.operating_room.id)
            .all(|(a1, a2)| !a1.operation_interval.overlaps(&a2.operation_interval))
    });
    Check {
        name: "no_overlap_patients_in_same_operating_room",
        message: format!("No two operations overlap within an OR: {}", format_check(passed)),
        passed,
    }
}

fn no_overlap_operating_and_cleaning_in_same_operating_room(instance: &Instance, assignments: &[Assignment]) -> Check {
    let passed = instance.operating_rooms.iter().all(|room| {
        pairs_in_room(assignments, room.id, |a| a.operating_room.id)
            .all(|(a1, a2)| !a1.cleaning_interval().overlaps(&a2.operation_interval))
    });
    Check {
        name: "no_overlap_operating_and_cleaning_in_same_operating_room",
        message: format!("No operation overlaps another's cleaning tail: {}", format_check(passed)),
        passed,
    }
}

fn operations_in_allowed_shift(instance: &Instance, assignments: &[Assignment]) -> Check {
    let passed = assignments
        .iter()
        .all(|a| instance.operation_window().iter().any(|w| w.contains(&a.operation_interval)));
    Check {
        name: "operations_in_allowed_shift",
        message: format!("Every operation lies inside the operating window: {}", format_check(passed)),
        passed,
    }
}

fn time_in_urpa_room(assignments: &[Assignment]) -> Check {
    let passed = assignments.iter().all(|a| {
        let urpa = a.urpa_interval();
        (urpa.duration() as i64) - a.waiting_time() == a.patient.surgical_type.urpa_time as i64
    });
    Check {
        name: "time_in_urpa_room",
        message: format!("URPA dwell time matches the surgical type's urpa_time: {}", format_check(passed)),
        passed,
    }
}

fn maximum_waiting_in_urpa_room(assignments: &[Assignment]) -> Check {
    let passed = assignments
        .iter()
        .all(|a| a.waiting_time() <= crate::domain::surgical_type::URPA_MAX_WAITING_TIME as i64);
    Check {
        name: "maximum_waiting_in_urpa_room",
        message: format!("No patient waits beyond the maximum URPA waiting time: {}", format_check(passed)),
        passed,
    }
}

fn uce_in_allowed_shift(instance: &Instance, assignments: &[Assignment]) -> Check {
    let passed = assignments.iter().all(|a| instance.uce_window().contains(&a.uce_interval));
    Check {
        name: "uce_in_allowed_shift",
        message: format!("Every UCE stay lies inside the UCE window: {}", format_check(passed)),
        passed,
    }
}

fn no_exceed_capacity_uce_room(instance: &Instance, assignments: &[Assignment]) -> Check {
    let window = instance.uce_window();
    let passed = instance.uce_rooms.iter().all(|room| {
        let in_room: Vec<&Assignment> = assignments.iter().filter(|a| a.uce_room.id == room.id).collect();
        (window.lower()..window.upper()).all(|hour| {
            in_room.iter().filter(|a| a.uce_interval.contains_point(hour)).count()
                <= crate::domain::uce_room::UCE_CAPACITY as usize
        })
    });
    Check {
        name: "no_exceed_capacity_uce_room",
        message: format!("No UCE room ever exceeds its capacity: {}", format_check(passed)),
        passed,
    }
}

fn no_mixed_sex_in_uce_room(instance: &Instance, assignments: &[Assignment]) -> Check {
    let passed = instance.uce_rooms.iter().all(|room| {
        pairs_in_room(assignments, room.id, |a| a.uce_room.id)
            .all(|(a1, a2)| a1.patient.sex == a2.patient.sex || !a1.uce_interval.overlaps(&a2.uce_interval))
    });
    Check {
        name: "no_mixed_sex_in_uce_room",
        message: format!("No UCE room ever mixes sexes among overlapping occupants: {}", format_check(passed)),
        passed,
    }
}

fn value_sol(assignments: &[Assignment], declared_value: i64) -> Check {
    let n = assignments.len() as i64;
    let priority: i64 = assignments.iter().map(|a| a.patient.priority as i64).sum();
    let uce_hours: i64 = assignments.iter().map(|a| a.uce_interval.duration() as i64).sum();
    let recomputed = 100 * n + 10 * priority + uce_hours;
    let passed = declared_value == recomputed;
    Check {
        name: "value_sol",
        message: format!(
            "declared {} vs recomputed {} (100*{} + 10*{} + 1*{}): {}",
            declared_value,
            recomputed,
            n,
            priority,
            uce_hours,
            format_check(passed)
        ),
        passed,
    }
}

fn maximum_cpu_time(cpu_seconds: u64) -> Check {
    let passed = cpu_seconds <= MAX_CPU_SECONDS;
    Check {
        name: "maximum_cpu_time",
        message: format!("cpu_seconds {} <= {}: {}", cpu_seconds, MAX_CPU_SECONDS, format_check(passed)),
        passed,
    }
}

/// Runs all eleven checks against a parsed instance and solution file.
pub fn run(instance: &Instance, parsed: &ParsedSolutionFile) -> Result<Report, TesterError> {
    let assignments = reconstruct_assignments(instance, parsed)?;
    let (declared_value, declared_cpu_seconds) = parsed.improvements.last().copied().ok_or(TesterError::NoImprovements)?;

    let checks = vec![
        patient_in_feasible_operating_room(&assignments),
        no_overlap_patients_in_same_operating_room(instance, &assignments),
        no_overlap_operating_and_cleaning_in_same_operating_room(instance, &assignments),
        operations_in_allowed_shift(instance, &assignments),
        time_in_urpa_room(&assignments),
        maximum_waiting_in_urpa_room(&assignments),
        uce_in_allowed_shift(instance, &assignments),
        no_exceed_capacity_uce_room(instance, &assignments),
        no_mixed_sex_in_uce_room(instance, &assignments),
        value_sol(&assignments, declared_value),
        maximum_cpu_time(declared_cpu_seconds),
    ];

    for check in &checks {
        if !check.passed {
            log::warn!("tester check failed: {} ({})", check.name, check.message);
        }
    }

    Ok(Report { checks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperatingRoom, Patient, SurgicalType};
    use crate::io::solution_file::ParsedSolutionFile;

    fn sample_instance() -> Instance {
        let st = SurgicalType::new(1, 2, 2, 24);
        let p = Patient::new(1, 5, 1, st);
        let or_ = OperatingRoom::new(1, st);
        Instance::new(vec![p], vec![or_])
    }

    #[test]
    fn a_consistent_solution_passes_every_check() {
        let instance = sample_instance();
        let uce_id = instance.uce_rooms[0].id;
        let parsed = ParsedSolutionFile {
            improvements: vec![(134, 10)],
            patient_ids: vec![1],
            or_ids: vec![1],
            op_starts: vec![8],
            uce_ids: vec![uce_id],
            uce_starts: vec![12],
        };
        let report = run(&instance, &parsed).unwrap();
        assert!(report.all_passed(), "{:?}", report.checks.iter().map(|c| &c.message).collect::<Vec<_>>());
    }

    #[test]
    fn a_wrong_declared_value_fails_value_sol_only() {
        let instance = sample_instance();
        let uce_id = instance.uce_rooms[0].id;
        let parsed = ParsedSolutionFile {
            improvements: vec![(999, 10)],
            patient_ids: vec![1],
            or_ids: vec![1],
            op_starts: vec![8],
            uce_ids: vec![uce_id],
            uce_starts: vec![12],
        };
        let report = run(&instance, &parsed).unwrap();
        let failing: Vec<&str> = report.checks.iter().filter(|c| !c.passed).map(|c| c.name).collect();
        assert_eq!(failing, vec!["value_sol"]);
    }

    #[test]
    fn unknown_patient_id_is_rejected() {
        let instance = sample_instance();
        let parsed = ParsedSolutionFile {
            improvements: vec![(134, 10)],
            patient_ids: vec![42],
            or_ids: vec![1],
            op_starts: vec![8],
            uce_ids: vec![1],
            uce_starts: vec![12],
        };
        assert!(matches!(run(&instance, &parsed), Err(TesterError::UnknownPatient(42))));
    }
}
