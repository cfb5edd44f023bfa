use super::surgical_type::SurgicalType;

/// Patient sex, used for UCE room sex-segregation rules.
pub type Sex = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Patient {
    pub id: u32,
    pub priority: u32,
    pub sex: Sex,
    pub surgical_type: SurgicalType,
}

impl Patient {
    pub const fn new(id: u32, priority: u32, sex: Sex, surgical_type: SurgicalType) -> Self {
        Self {
            id,
            priority,
            sex,
            surgical_type,
        }
    }

    /// Hours from operation start to the moment this patient may enter UCE.
    pub fn time_to_uce(&self) -> u32 {
        self.surgical_type.urpa_time + self.surgical_type.operation_time
    }

    /// Hours from operation start to the moment this patient may leave UCE.
    pub fn time_to_leave(&self) -> u32 {
        self.time_to_uce() + self.surgical_type.uce_time
    }

    /// Preference order in which UCE rooms of each sex-lock are tried:
    /// own sex first, then unassigned, never the opposite sex.
    pub fn sex_order(&self) -> [Sex; 3] {
        if self.sex == 1 {
            [1, 0, 2]
        } else {
            [2, 0, 1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st() -> SurgicalType {
        SurgicalType::new(1, 2, 2, 24)
    }

    #[test]
    fn time_helpers() {
        let p = Patient::new(1, 5, 1, st());
        assert_eq!(p.time_to_uce(), 4);
        assert_eq!(p.time_to_leave(), 28);
    }

    #[test]
    fn sex_order_male_tries_own_then_unassigned() {
        let p = Patient::new(1, 5, 1, st());
        assert_eq!(p.sex_order(), [1, 0, 2]);
    }

    #[test]
    fn sex_order_female_tries_own_then_unassigned() {
        let p = Patient::new(1, 5, 2, st());
        assert_eq!(p.sex_order(), [2, 0, 1]);
    }
}
