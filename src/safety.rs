//! Report safety evaluation with problem dampening.
//!
//! A report is safe when its levels move in one direction by a bounded step
//! at every adjacent pair. The dampener allows a limited number of levels to
//! be dropped before the report must comply.
//!
//! Each direction is checked as an independent pass over the original
//! report, and the verdict is the OR of both passes. On the first violation
//! with budget remaining, every position is tried as the removed level (not
//! only the two around the violation) and the shortened copy is checked
//! again against the same direction with one less removal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Smallest allowed step magnitude by default.
pub const DEFAULT_MIN_STEP: i64 = 1;
/// Largest allowed step magnitude by default.
pub const DEFAULT_MAX_STEP: i64 = 3;

/// Required trend of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Each level is higher than the previous one
    Ascending,
    /// Each level is lower than the previous one
    Descending,
}

impl Direction {
    /// Both directions, in evaluation order.
    pub const ALL: [Direction; 2] = [Direction::Ascending, Direction::Descending];

    /// Signed interval a step must fall in for this direction.
    pub fn interval(self, bounds: StepBounds) -> RangeInclusive<i64> {
        match self {
            Direction::Ascending => bounds.min..=bounds.max,
            Direction::Descending => -bounds.max..=-bounds.min,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ascending"),
            Direction::Descending => write!(f, "descending"),
        }
    }
}

/// Allowed step magnitude between adjacent levels, inclusive on both ends.
///
/// A step of zero is never allowed as long as `min >= 1`, which the
/// configuration layer enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for StepBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_STEP,
            max: DEFAULT_MAX_STEP,
        }
    }
}

/// Receives side observations while a report is evaluated.
///
/// Observations never influence the verdict. Both methods default to no-ops
/// so implementors only override what they need.
pub trait SafetyObserver {
    /// `levels` passed the `direction` check without further removals.
    fn direction_passed(&mut self, _direction: Direction, _levels: &[i64]) {}

    /// Dropping `removed` from `levels` let the report pass in `direction`.
    fn removal_permitted(&mut self, _direction: Direction, _levels: &[i64], _removed: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SafetyObserver for NoopObserver {}

/// One recorded observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    DirectionPassed {
        direction: Direction,
        levels: Vec<i64>,
    },
    RemovalPermitted {
        direction: Direction,
        levels: Vec<i64>,
        removed: usize,
    },
}

/// Observer that records every event in order.
#[derive(Debug, Default, Clone)]
pub struct TraceBuffer {
    events: Vec<TraceEvent>,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Recorded removals in the order they were permitted.
    ///
    /// With a budget above one, a nested removal is recorded before the
    /// removal that led to it.
    pub fn removals(&self) -> Vec<(Direction, usize)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::RemovalPermitted {
                    direction, removed, ..
                } => Some((*direction, *removed)),
                TraceEvent::DirectionPassed { .. } => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SafetyObserver for TraceBuffer {
    fn direction_passed(&mut self, direction: Direction, levels: &[i64]) {
        self.events.push(TraceEvent::DirectionPassed {
            direction,
            levels: levels.to_vec(),
        });
    }

    fn removal_permitted(&mut self, direction: Direction, levels: &[i64], removed: usize) {
        self.events.push(TraceEvent::RemovalPermitted {
            direction,
            levels: levels.to_vec(),
            removed,
        });
    }
}

/// Decides whether reports are safe.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SafetyEvaluator {
    bounds: StepBounds,
}

impl SafetyEvaluator {
    pub fn new(bounds: StepBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> StepBounds {
        self.bounds
    }

    /// Returns true if `levels` is safe in either direction after at most
    /// `budget` removals.
    pub fn is_safe(&self, levels: &[i64], budget: u32) -> bool {
        self.is_safe_observed(levels, budget, &mut NoopObserver)
    }

    /// Same verdict as [`is_safe`](Self::is_safe), reporting which direction
    /// and removal succeeded to `observer`.
    pub fn is_safe_observed(
        &self,
        levels: &[i64],
        budget: u32,
        observer: &mut dyn SafetyObserver,
    ) -> bool {
        // Evaluate both directions even when the first passes, so the
        // observer sees the same events regardless of ordering.
        let ascending = self.is_safe_in(Direction::Ascending, levels, budget, observer);
        let descending = self.is_safe_in(Direction::Descending, levels, budget, observer);
        ascending || descending
    }

    /// Single-direction pass.
    pub fn is_safe_in(
        &self,
        direction: Direction,
        levels: &[i64],
        budget: u32,
        observer: &mut dyn SafetyObserver,
    ) -> bool {
        let interval = direction.interval(self.bounds);

        if first_violation(levels, &interval).is_none() {
            observer.direction_passed(direction, levels);
            return true;
        }

        if budget == 0 {
            return false;
        }

        for removed in 0..levels.len() {
            let candidate = without(levels, removed);
            if self.is_safe_in(direction, &candidate, budget - 1, observer) {
                observer.removal_permitted(direction, levels, removed);
                return true;
            }
        }

        false
    }
}

/// Index of the first adjacent pair whose step leaves `interval`.
///
/// The returned index is the position of the earlier level in the pair. A
/// step that overflows `i64` counts as a violation.
pub fn first_violation(levels: &[i64], interval: &RangeInclusive<i64>) -> Option<usize> {
    levels.windows(2).position(|pair| {
        pair[1]
            .checked_sub(pair[0])
            .map_or(true, |step| !interval.contains(&step))
    })
}

/// Copy of `levels` with the element at `index` elided.
pub(crate) fn without(levels: &[i64], index: usize) -> Vec<i64> {
    let mut candidate = Vec::with_capacity(levels.len().saturating_sub(1));
    candidate.extend_from_slice(&levels[..index]);
    candidate.extend_from_slice(&levels[index + 1..]);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn safe(levels: &[i64], budget: u32) -> bool {
        SafetyEvaluator::default().is_safe(levels, budget)
    }

    #[test]
    fn test_empty_and_single_are_safe() {
        assert!(safe(&[], 0));
        assert!(safe(&[42], 0));
        assert!(safe(&[-7], 1));
    }

    #[test]
    fn test_sample_reports_without_dampener() {
        assert!(safe(&[7, 6, 4, 2, 1], 0));
        assert!(!safe(&[1, 2, 7, 8, 9], 0));
        assert!(!safe(&[9, 7, 6, 2, 1], 0));
        assert!(!safe(&[1, 3, 2, 4, 5], 0));
        assert!(!safe(&[8, 6, 4, 4, 1], 0));
        assert!(safe(&[1, 3, 6, 7, 9], 0));
    }

    #[test]
    fn test_sample_reports_with_dampener() {
        assert!(safe(&[7, 6, 4, 2, 1], 1));
        assert!(!safe(&[1, 2, 7, 8, 9], 1));
        assert!(!safe(&[9, 7, 6, 2, 1], 1));
        assert!(safe(&[1, 3, 2, 4, 5], 1));
        assert!(safe(&[8, 6, 4, 4, 1], 1));
        assert!(safe(&[1, 3, 6, 7, 9], 1));
    }

    #[test]
    fn test_zero_step_violates_both_directions() {
        assert!(!safe(&[5, 5], 0));
        assert!(safe(&[5, 5], 1));
        assert!(!safe(&[5, 5, 5], 1));
        assert!(safe(&[5, 5, 5], 2));
    }

    #[test]
    fn test_removing_first_level_recovers() {
        // Only dropping index 0 fixes this; the violation is at the first pair.
        assert!(!safe(&[10, 1, 2, 3], 0));
        assert!(safe(&[10, 1, 2, 3], 1));
    }

    #[test]
    fn test_removing_last_level_recovers() {
        assert!(safe(&[1, 2, 3, 3], 1));
        assert!(safe(&[1, 2, 3, 20], 1));
    }

    #[test]
    fn test_direction_change_needs_removal() {
        // Ascending then one drop: removing the 1 restores ascending.
        assert!(!safe(&[1, 2, 3, 1, 4], 0));
        assert!(safe(&[1, 2, 3, 1, 4], 1));
    }

    #[test]
    fn test_overflowing_step_is_a_violation() {
        assert!(!safe(&[i64::MIN, i64::MAX], 0));
        assert!(!safe(&[i64::MAX, i64::MIN], 0));
        assert!(safe(&[i64::MAX - 2, i64::MAX], 0));
    }

    #[test]
    fn test_custom_bounds() {
        let wide = SafetyEvaluator::new(StepBounds { min: 1, max: 5 });
        assert!(wide.is_safe(&[1, 2, 7, 8, 9], 0));
        assert!(!wide.is_safe(&[1, 2, 8, 9], 0));

        let strict = SafetyEvaluator::new(StepBounds { min: 2, max: 2 });
        assert!(strict.is_safe(&[2, 4, 6], 0));
        assert!(!strict.is_safe(&[2, 3, 5], 0));
    }

    #[test]
    fn test_direction_interval() {
        let bounds = StepBounds::default();
        assert_eq!(Direction::Ascending.interval(bounds), 1..=3);
        assert_eq!(Direction::Descending.interval(bounds), -3..=-1);
    }

    #[test]
    fn test_first_violation_position() {
        let interval = Direction::Ascending.interval(StepBounds::default());
        assert_eq!(first_violation(&[1, 2, 3], &interval), None);
        assert_eq!(first_violation(&[1, 2, 2, 3], &interval), Some(1));
        assert_eq!(first_violation(&[9, 1], &interval), Some(0));
    }

    #[test]
    fn test_directions_are_independent_passes() {
        let evaluator = SafetyEvaluator::default();
        let levels = [8, 6, 4, 4, 1];
        assert!(!evaluator.is_safe_in(Direction::Ascending, &levels, 1, &mut NoopObserver));
        assert!(evaluator.is_safe_in(Direction::Descending, &levels, 1, &mut NoopObserver));
    }

    #[test]
    fn test_trace_records_removal() {
        let evaluator = SafetyEvaluator::default();
        let mut trace = TraceBuffer::new();

        assert!(evaluator.is_safe_observed(&[1, 3, 2, 4, 5], 1, &mut trace));
        // Index 1 (the 3) is the first removal that works.
        assert_eq!(trace.removals(), vec![(Direction::Ascending, 1)]);
        assert!(trace.events().contains(&TraceEvent::DirectionPassed {
            direction: Direction::Ascending,
            levels: vec![1, 2, 4, 5],
        }));
    }

    #[test]
    fn test_trace_records_direct_pass() {
        let evaluator = SafetyEvaluator::default();
        let mut trace = TraceBuffer::new();

        assert!(evaluator.is_safe_observed(&[7, 6, 4, 2, 1], 0, &mut trace));
        assert_eq!(
            trace.events(),
            &[TraceEvent::DirectionPassed {
                direction: Direction::Descending,
                levels: vec![7, 6, 4, 2, 1],
            }]
        );
        assert!(trace.removals().is_empty());
    }

    #[test]
    fn test_trace_nested_removals_innermost_first() {
        let evaluator = SafetyEvaluator::default();
        let mut trace = TraceBuffer::new();

        assert!(evaluator.is_safe_observed(&[5, 5, 5], 2, &mut trace));
        let removals = trace.removals();
        assert_eq!(
            removals,
            vec![
                (Direction::Ascending, 0),
                (Direction::Ascending, 0),
                (Direction::Descending, 0),
                (Direction::Descending, 0),
            ]
        );
    }

    #[test]
    fn test_observer_does_not_change_verdict() {
        let evaluator = SafetyEvaluator::default();
        let mut rng = StdRng::seed_from_u64(0x5afe);

        for _ in 0..500 {
            let len = rng.gen_range(0..8);
            let levels: Vec<i64> = (0..len).map(|_| rng.gen_range(0..12)).collect();
            for budget in 0..3 {
                let mut trace = TraceBuffer::new();
                assert_eq!(
                    evaluator.is_safe(&levels, budget),
                    evaluator.is_safe_observed(&levels, budget, &mut trace),
                    "levels {:?} budget {}",
                    levels,
                    budget
                );
            }
        }
    }

    #[test]
    fn test_safety_is_monotonic_in_budget() {
        let evaluator = SafetyEvaluator::default();
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..500 {
            let len = rng.gen_range(0..9);
            let levels: Vec<i64> = (0..len).map(|_| rng.gen_range(-5..15)).collect();
            for budget in 0..2 {
                if evaluator.is_safe(&levels, budget) {
                    assert!(
                        evaluator.is_safe(&levels, budget + 1),
                        "levels {:?} safe at {} but not {}",
                        levels,
                        budget,
                        budget + 1
                    );
                }
            }
        }
    }

    #[test]
    fn test_generated_monotonic_runs_are_safe() {
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let len = rng.gen_range(2..10);
            let mut rising = vec![rng.gen_range(-100..100)];
            for _ in 1..len {
                let last = *rising.last().unwrap();
                rising.push(last + rng.gen_range(1..=3));
            }
            let falling: Vec<i64> = rising.iter().rev().copied().collect();

            assert!(safe(&rising, 0), "rising {:?}", rising);
            assert!(safe(&falling, 0), "falling {:?}", falling);
        }
    }

    #[test]
    fn test_single_fixable_violation_needs_dampener() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let len = rng.gen_range(3..9);
            let mut levels = vec![rng.gen_range(0..50)];
            for _ in 1..len {
                let last = *levels.last().unwrap();
                levels.push(last + rng.gen_range(1..=3));
            }
            // Duplicate a level to introduce exactly one zero step.
            let at = rng.gen_range(0..levels.len());
            let duplicate = levels[at];
            levels.insert(at, duplicate);

            assert!(!safe(&levels, 0), "levels {:?}", levels);
            assert!(safe(&levels, 1), "levels {:?}", levels);
        }
    }
}
