//! A growing, never-revoked set of assignments built by the placer, together
//! with the per-room indexes the availability engine reads and the
//! objective-value bookkeeping used by the search driver.

use std::collections::HashMap;

use crate::availability;
use crate::domain::uce_room::SexLock;
use crate::domain::{Assignment, Instance, Patient};

const WEIGHT_COUNT: i64 = 100;
const WEIGHT_PRIORITY: i64 = 10;
const WEIGHT_UCE_HOURS: i64 = 1;

/// One candidate (operating room, free interval) or (UCE room, free
/// interval) pair the placer searches over for a single patient.
#[derive(Debug, Clone, Copy)]
pub struct RoomSlot<R> {
    pub room: R,
    pub free: crate::interval::Interval,
}

#[derive(Debug, Clone)]
pub struct Solution<'a> {
    instance: &'a Instance,
    assignments: Vec<Assignment>,
    assignments_by_or: HashMap<u32, Vec<Assignment>>,
    assignments_by_ur: HashMap<u32, Vec<Assignment>>,
    /// Per-solution overlay: no two solutions built from the same instance
    /// may share mutable UCE room state, so the sex lock lives here rather
    /// than on a shared `UceRoom`.
    sex_locks: HashMap<u32, SexLock>,
}

impl<'a> Solution<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        let assignments_by_or = instance.operating_rooms.iter().map(|r| (r.id, Vec::new())).collect();
        let assignments_by_ur = instance.uce_rooms.iter().map(|r| (r.id, Vec::new())).collect();
        let sex_locks = instance.uce_rooms.iter().map(|r| (r.id, SexLock::default())).collect();
        Self {
            instance,
            assignments: Vec::new(),
            assignments_by_or,
            assignments_by_ur,
            sex_locks,
        }
    }

    pub fn instance(&self) -> &Instance {
        self.instance
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn is_placed(&self, patient_id: u32) -> bool {
        self.assignments.iter().any(|a| a.patient.id == patient_id)
    }

    pub fn sex_lock(&self, uce_room_id: u32) -> SexLock {
        self.sex_locks.get(&uce_room_id).copied().unwrap_or_default()
    }

    /// Commits `assignment`, latching the target UCE room's sex lock on
    /// first occupancy.
    pub fn assign(&mut self, assignment: Assignment) {
        let uce_id = assignment.uce_room.id;
        let sex = assignment.patient.sex;
        self.sex_locks.entry(uce_id).or_default().latch(sex);

        self.assignments_by_or
            .entry(assignment.operating_room.id)
            .or_default()
            .push(assignment);
        self.assignments_by_ur.entry(uce_id).or_default().push(assignment);
        self.assignments.push(assignment);
    }

    pub fn availability_or(&self, or_id: u32) -> crate::interval_set::IntervalSet {
        let empty = Vec::new();
        let placed = self.assignments_by_or.get(&or_id).unwrap_or(&empty);
        availability::availability_or(self.instance, placed)
    }

    pub fn availability_ur(&self, uce_id: u32, sex: u8) -> crate::interval_set::IntervalSet {
        let empty = Vec::new();
        let placed = self.assignments_by_ur.get(&uce_id).unwrap_or(&empty);
        availability::availability_ur(self.instance, placed, sex)
    }

    /// `(operating room, free interval)` pairs long enough to host this
    /// patient's operation.
    pub fn find_available_ors(&self, patient: &Patient) -> Vec<RoomSlot<crate::domain::OperatingRoom>> {
        let mut out = Vec::new();
        for room in self.instance.feasible_operating_rooms(patient) {
            for free in self.availability_or(room.id).iter() {
                if free.can_fit(free.lower(), patient.surgical_type.operation_time) {
                    out.push(RoomSlot { room, free: *free });
                }
            }
        }
        out
    }

    /// `(UCE room, free interval)` pairs long enough to host this patient's
    /// UCE stay, for every room regardless of current sex lock (the caller
    /// filters by `sex_lock`).
    pub fn find_available_uces(&self, patient: &Patient) -> Vec<RoomSlot<crate::domain::UceRoom>> {
        let mut out = Vec::new();
        for room in &self.instance.uce_rooms {
            for free in self.availability_ur(room.id, patient.sex).iter() {
                if free.can_fit(free.lower(), patient.surgical_type.uce_time) {
                    out.push(RoomSlot { room: *room, free: *free });
                }
            }
        }
        out
    }

    pub fn number_operated_patients(&self) -> usize {
        self.assignments.len()
    }

    pub fn weighted_number_operated_patients(&self) -> u64 {
        self.assignments.iter().map(|a| a.patient.priority as u64).sum()
    }

    pub fn uce_number_hours(&self) -> u64 {
        self.assignments
            .iter()
            .map(|a| a.uce_interval.duration() as u64)
            .sum()
    }

    /// `100 * N + 10 * priority_sum + 1 * uce_hours`.
    pub fn value(&self) -> i64 {
        WEIGHT_COUNT * self.number_operated_patients() as i64
            + WEIGHT_PRIORITY * self.weighted_number_operated_patients() as i64
            + WEIGHT_UCE_HOURS * self.uce_number_hours() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperatingRoom, SurgicalType};

    #[test]
    fn value_matches_objective_formula() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let or_ = OperatingRoom::new(1, st);
        let instance = Instance::new(vec![], vec![or_]);
        let mut sol = Solution::new(&instance);
        let p = Patient::new(1, 5, 1, st);
        let uce = instance.uce_rooms[0];
        sol.assign(Assignment::new(p, or_, 8, uce, 12));
        assert_eq!(sol.value(), 100 + 50 + 24);
    }

    #[test]
    fn assign_latches_sex_lock() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let or_ = OperatingRoom::new(1, st);
        let instance = Instance::new(vec![], vec![or_]);
        let mut sol = Solution::new(&instance);
        let p = Patient::new(1, 5, 1, st);
        let uce = instance.uce_rooms[0];
        assert!(sol.sex_lock(uce.id).matches(2));
        sol.assign(Assignment::new(p, or_, 8, uce, 12));
        assert!(!sol.sex_lock(uce.id).matches(2));
        assert!(sol.sex_lock(uce.id).matches(1));
    }

    #[test]
    fn is_placed_tracks_committed_patients() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let or_ = OperatingRoom::new(1, st);
        let instance = Instance::new(vec![], vec![or_]);
        let mut sol = Solution::new(&instance);
        let p = Patient::new(7, 5, 1, st);
        assert!(!sol.is_placed(7));
        let uce = instance.uce_rooms[0];
        sol.assign(Assignment::new(p, or_, 8, uce, 12));
        assert!(sol.is_placed(7));
    }
}
