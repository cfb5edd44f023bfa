//! Candidate-selection criteria used while placing a single patient.
//!
//! Modelled as a tagged enum rather than a trait object: the placer's
//! innermost loop evaluates thousands of candidates per patient, and a
//! `match` on a small enum keeps that loop free of virtual dispatch.

use crate::domain::Assignment;
use crate::interval::Interval;

#[derive(Debug, Clone, Copy)]
pub enum CriterionKind {
    /// Prefer the earliest `uce_interval.lower()` that is `>= lower_bound`.
    MinStart { lower_bound: u32 },
    /// Accept only candidates whose `uce_interval.upper() >= upper_bound`;
    /// among those, prefer the latest `uce_interval.lower()`.
    MaxStart { upper_bound: u32 },
    /// Prefer the candidate that sits closest to an edge of its enclosing
    /// free UCE interval, special-cased at the instance's UCE window
    /// boundaries.
    MinGap { window: Interval },
}

/// Accumulates the best candidate seen so far for one patient placement.
pub struct Criterion {
    kind: CriterionKind,
    best: Option<Assignment>,
    best_score: Option<i64>,
}

impl Criterion {
    pub fn new(kind: CriterionKind) -> Self {
        Self {
            kind,
            best: None,
            best_score: None,
        }
    }

    pub fn min_start(lower_bound: u32) -> Self {
        Self::new(CriterionKind::MinStart { lower_bound })
    }

    pub fn max_start(upper_bound: u32) -> Self {
        Self::new(CriterionKind::MaxStart { upper_bound })
    }

    pub fn min_gap(window: Interval) -> Self {
        Self::new(CriterionKind::MinGap { window })
    }

    pub fn is_first(&self) -> bool {
        self.best.is_none()
    }

    pub fn best(&self) -> Option<&Assignment> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<Assignment> {
        self.best
    }

    fn accept(&mut self, candidate: Assignment, score: i64) {
        self.best = Some(candidate);
        self.best_score = Some(score);
    }

    /// Evaluates one candidate assignment against the enclosing free UCE
    /// interval it was carved from. Updates `best` in place if the
    /// candidate wins under this criterion's ordering.
    pub fn evaluate(&mut self, candidate: Assignment, free_interval: Interval) {
        match self.kind {
            CriterionKind::MinStart { lower_bound } => {
                let start = candidate.uce_interval.lower();
                if start < lower_bound {
                    return;
                }
                let score = start as i64;
                if self.best_score.map_or(true, |best| score < best) {
                    self.accept(candidate, score);
                }
            }
            CriterionKind::MaxStart { upper_bound } => {
                let end = candidate.uce_interval.upper();
                if end < upper_bound {
                    return;
                }
                let start = candidate.uce_interval.lower();
                let score = start as i64;
                if self.best_score.map_or(true, |best| score > best) {
                    self.accept(candidate, score);
                }
            }
            CriterionKind::MinGap { window } => {
                let op_start = candidate.operation_interval.lower() as i64;
                let to_start = (op_start - free_interval.lower() as i64).abs();
                let to_end = (op_start - free_interval.upper() as i64).abs();
                let blanks = if free_interval.lower() == window.lower() {
                    to_end
                } else if free_interval.upper() == window.upper() {
                    to_start
                } else {
                    to_start.min(to_end)
                };
                if self.best_score.map_or(true, |best| blanks < best) {
                    self.accept(candidate, blanks);
                }
            }
        }
    }
}
