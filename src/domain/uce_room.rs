/// Maximum simultaneous occupants of a UCE room.
pub const UCE_CAPACITY: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UceRoom {
    pub id: u32,
}

impl UceRoom {
    pub const fn new(id: u32) -> Self {
        Self { id }
    }
}

/// Sex-lock state of a UCE room, latched on first occupancy.
///
/// This is kept out of `UceRoom` itself and owned per-`Solution` (see
/// `solution::Solution`), since multiple solutions built from the same
/// instance must not share mutable room state across parallel workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SexLock {
    #[default]
    Unassigned,
    Locked(u8),
}

impl SexLock {
    pub fn matches(&self, sex: u8) -> bool {
        match self {
            SexLock::Unassigned => true,
            SexLock::Locked(s) => *s == sex,
        }
    }

    /// Latches to `sex` only if currently unassigned.
    pub fn latch(&mut self, sex: u8) {
        if matches!(self, SexLock::Unassigned) {
            *self = SexLock::Locked(sex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_only_sets_once() {
        let mut lock = SexLock::default();
        assert!(lock.matches(1));
        assert!(lock.matches(2));
        lock.latch(1);
        assert!(lock.matches(1));
        assert!(!lock.matches(2));
        lock.latch(2);
        assert!(lock.matches(1));
    }
}
