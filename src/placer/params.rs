//! Strategy knobs that bias the greedy placer's phase order and default
//! criterion.

use crate::criteria::CriterionKind;

/// End-loading `uce_time` buckets, tried widest-stay-first.
pub const END_LOAD_UCE_TIMES: [u32; 5] = [72, 60, 48, 36, 24];
/// End-loading `min_end` thresholds, tried latest-first.
pub const END_LOAD_MIN_ENDS: [u32; 2] = [156, 144];
/// Front-loading UCE start threshold.
pub const FRONT_LOAD_MIN_START: u32 = 14;
/// Number of placements after which a phase stops early (`2 * |UCE rooms|`).
pub const PHASE_PLACEMENT_CAP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCriterionKind {
    MinStart,
    MaxStart,
    MinGap,
}

impl DefaultCriterionKind {
    pub fn instantiate(self, window: crate::interval::Interval) -> CriterionKind {
        match self {
            DefaultCriterionKind::MinStart => CriterionKind::MinStart { lower_bound: 0 },
            DefaultCriterionKind::MaxStart => CriterionKind::MaxStart { upper_bound: 0 },
            DefaultCriterionKind::MinGap => CriterionKind::MinGap { window },
        }
    }
}

/// The four binary knobs plus default criterion that together select which
/// of the three placement phases run, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionParameters {
    pub assign_last: bool,
    pub assign_beginning: bool,
    pub sort_by_maximum: bool,
    pub sort_by_uce: bool,
    pub default_criterion: DefaultCriterionKind,
}

impl SolutionParameters {
    pub const fn new(
        sort_by_uce: bool,
        sort_by_maximum: bool,
        assign_last: bool,
        assign_beginning: bool,
        default_criterion: DefaultCriterionKind,
    ) -> Self {
        Self {
            assign_last,
            assign_beginning,
            sort_by_maximum,
            sort_by_uce,
            default_criterion,
        }
    }
}

/// The nine fixed strategy presets evaluated by the search driver.
pub fn strategy_presets() -> [SolutionParameters; 9] {
    use DefaultCriterionKind::*;
    [
        SolutionParameters::new(false, false, false, false, MinStart),
        SolutionParameters::new(false, false, false, false, MaxStart),
        SolutionParameters::new(false, false, false, false, MinGap),
        SolutionParameters::new(false, false, false, true, MinStart),
        SolutionParameters::new(true, false, true, false, MaxStart),
        SolutionParameters::new(false, true, true, true, MaxStart),
        SolutionParameters::new(true, true, true, true, MinGap),
        SolutionParameters::new(true, true, true, true, MaxStart),
        SolutionParameters::new(true, true, true, true, MinStart),
    ]
}
