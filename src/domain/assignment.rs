use super::operating_room::OperatingRoom;
use super::patient::Patient;
use super::uce_room::UceRoom;
use crate::interval::Interval;

/// A committed placement of one patient into one OR interval, one cleaning
/// tail, and one UCE stay. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub patient: Patient,
    pub operating_room: OperatingRoom,
    pub operation_interval: Interval,
    pub operation_cleaning_interval: Interval,
    pub uce_room: UceRoom,
    pub uce_interval: Interval,
}

impl Assignment {
    pub fn new(
        patient: Patient,
        operating_room: OperatingRoom,
        operation_start: u32,
        uce_room: UceRoom,
        uce_start: u32,
    ) -> Self {
        let op_time = patient.surgical_type.operation_time;
        let cleaning = patient.surgical_type.operation_time
            + crate::domain::surgical_type::CLEANING_TIME;
        let uce_time = patient.surgical_type.uce_time;
        Self {
            patient,
            operating_room,
            operation_interval: Interval::new(operation_start, operation_start + op_time),
            operation_cleaning_interval: Interval::new(operation_start, operation_start + cleaning),
            uce_room,
            uce_interval: Interval::new(uce_start, uce_start + uce_time),
        }
    }

    /// `[operation end, uce start)` — the implicit, unresourced recovery gap.
    pub fn urpa_interval(&self) -> Interval {
        Interval::new(self.operation_interval.upper(), self.uce_interval.lower())
    }

    /// The post-operation cleaning tail alone, i.e. `operation_cleaning_interval`
    /// minus `operation_interval`.
    pub fn cleaning_interval(&self) -> Interval {
        Interval::new(
            self.operation_interval.upper(),
            self.operation_cleaning_interval.upper(),
        )
    }

    /// Hours the patient waits in recovery beyond the mandatory `urpa_time`
    /// before the UCE stay begins.
    pub fn waiting_time(&self) -> i64 {
        self.uce_interval.lower() as i64
            - (self.operation_interval.upper() as i64 + self.patient.surgical_type.urpa_time as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::surgical_type::SurgicalType;

    #[test]
    fn derived_intervals() {
        let st = SurgicalType::new(1, 2, 2, 24);
        let p = Patient::new(1, 5, 1, st);
        let or_ = OperatingRoom::new(1, st);
        let uce = UceRoom::new(1);
        let a = Assignment::new(p, or_, 8, uce, 14);
        assert_eq!(a.operation_interval, Interval::new(8, 10));
        assert_eq!(a.operation_cleaning_interval, Interval::new(8, 11));
        assert_eq!(a.cleaning_interval(), Interval::new(10, 11));
        assert_eq!(a.urpa_interval(), Interval::new(10, 14));
        assert_eq!(a.waiting_time(), 2);
    }
}
