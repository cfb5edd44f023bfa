use std::collections::HashSet;

use super::operating_room::OperatingRoom;
use super::patient::Patient;
use super::uce_room::UceRoom;
use crate::interval::Interval;
use crate::interval_set::IntervalSet;

const UCE_ROOM_COUNT: u32 = 10;

const FIRST_HOUR: u32 = 0;
const OPERATING_HOUR_OPEN: u32 = FIRST_HOUR + 8;
const OPERATING_HOUR_CLOSE: u32 = FIRST_HOUR + 20;
const OPERATING_DAYS_OPEN: u32 = 4;
const UCE_HOUR_OPEN: u32 = FIRST_HOUR + 12;
const UCE_DAYS_OPEN: u32 = 6;

fn calculate_operation_window() -> IntervalSet {
    let mut set = IntervalSet::new();
    for day in 0..OPERATING_DAYS_OPEN {
        set.push(Interval::new(
            OPERATING_HOUR_OPEN + 24 * day,
            OPERATING_HOUR_CLOSE + 24 * day,
        ));
    }
    set
}

fn calculate_uce_window() -> Interval {
    Interval::new(UCE_HOUR_OPEN, UCE_HOUR_OPEN + 24 * UCE_DAYS_OPEN)
}

/// The full immutable problem input: patients, operating rooms, ten fixed
/// UCE rooms, and the two fixed availability windows.
#[derive(Debug, Clone)]
pub struct Instance {
    pub patients: Vec<Patient>,
    pub operating_rooms: Vec<OperatingRoom>,
    pub uce_rooms: Vec<UceRoom>,
    operation_window: IntervalSet,
    uce_window: Interval,
}

impl Instance {
    pub fn new(patients: Vec<Patient>, operating_rooms: Vec<OperatingRoom>) -> Self {
        let uce_rooms = (1..=UCE_ROOM_COUNT).map(UceRoom::new).collect();
        Self {
            patients,
            operating_rooms,
            uce_rooms,
            operation_window: calculate_operation_window(),
            uce_window: calculate_uce_window(),
        }
    }

    pub fn operation_window(&self) -> &IntervalSet {
        &self.operation_window
    }

    pub fn uce_window(&self) -> Interval {
        self.uce_window
    }

    /// Patients whose surgical type is served by at least one OR.
    pub fn operable_patients(&self) -> Vec<Patient> {
        let available: HashSet<u32> = self
            .operating_rooms
            .iter()
            .map(|room| room.surgical_type.id)
            .collect();
        self.patients
            .iter()
            .copied()
            .filter(|p| available.contains(&p.surgical_type.id))
            .collect()
    }

    /// Operating rooms whose surgical type matches the patient's.
    pub fn feasible_operating_rooms(&self, patient: &Patient) -> Vec<OperatingRoom> {
        self.operating_rooms
            .iter()
            .copied()
            .filter(|room| room.surgical_type.id == patient.surgical_type.id)
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::surgical_type::SurgicalType;

    fn st(id: u32) -> SurgicalType {
        SurgicalType::new(id, 2, 2, 24)
    }

    #[test]
    fn operation_window_covers_four_weekdays() {
        let inst = Instance::new(vec![], vec![]);
        let w = inst.operation_window();
        assert_eq!(w.len(), 4);
        assert_eq!(w[0], Interval::new(8, 20));
        assert_eq!(w[3], Interval::new(80, 92));
    }

    #[test]
    fn uce_window_opens_monday_noon_for_six_days() {
        let inst = Instance::new(vec![], vec![]);
        assert_eq!(inst.uce_window(), Interval::new(12, 156));
    }

    #[test]
    fn ten_uce_rooms_created() {
        let inst = Instance::new(vec![], vec![]);
        assert_eq!(inst.uce_rooms.len(), 10);
    }

    #[test]
    fn operable_patients_filters_by_available_surgical_type() {
        let p1 = Patient::new(1, 1, 1, st(1));
        let p2 = Patient::new(2, 1, 1, st(2));
        let or_ = OperatingRoom::new(1, st(1));
        let inst = Instance::new(vec![p1, p2], vec![or_]);
        let operable = inst.operable_patients();
        assert_eq!(operable.len(), 1);
        assert_eq!(operable[0].id, 1);
    }

    #[test]
    fn feasible_operating_rooms_matches_type() {
        let or1 = OperatingRoom::new(1, st(1));
        let or2 = OperatingRoom::new(2, st(2));
        let inst = Instance::new(vec![], vec![or1, or2]);
        let p = Patient::new(1, 1, 1, st(2));
        let rooms = inst.feasible_operating_rooms(&p);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, 2);
    }
}
