// Per-gesture anchor tracking shared by pan, pinch and rotate.
use std::ops::Sub;

use crate::model::Phase;

/// Reference value captured when a continuous gesture begins.
///
/// `Idle` until a `Began` phase arrives, `Tracking(v)` while the gesture is live.
/// Every `Changed` phase yields the increment since the previous event and re-anchors,
/// so the caller accumulates small deltas instead of a running total from gesture start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Anchor<T> {
    #[default]
    Idle,
    Tracking(T),
}

impl<T> Anchor<T>
where
    T: Copy + Sub<Output = T>,
{
    /// Feed one phase/value pair; returns the delta to apply, if any.
    pub fn advance(&mut self, phase: Phase, value: T) -> Option<T> {
        match phase {
            Phase::Began => {
                *self = Anchor::Tracking(value);
                None
            }
            Phase::Changed => match *self {
                Anchor::Tracking(prev) => {
                    *self = Anchor::Tracking(value);
                    Some(value - prev)
                }
                // change without begin (or after end) is ignored
                Anchor::Idle => None,
            },
            Phase::Ended | Phase::Cancelled => {
                *self = Anchor::Idle;
                None
            }
            Phase::Possible | Phase::Failed => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, Anchor::Tracking(_))
    }

    #[cfg(test)]
    fn value(&self) -> Option<T> {
        match self {
            Anchor::Tracking(v) => Some(*v),
            Anchor::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    #[test]
    fn change_without_begin_is_ignored() {
        let mut a: Anchor<f64> = Anchor::Idle;
        assert_eq!(a.advance(Phase::Changed, 2.0), None);
        assert!(!a.is_tracking());
    }

    #[test]
    fn change_yields_increment_and_reanchors() {
        let mut a = Anchor::default();
        assert_eq!(a.advance(Phase::Began, 1.0), None);
        assert_eq!(a.advance(Phase::Changed, 1.5), Some(0.5));
        assert_eq!(a.value(), Some(1.5));
        assert_eq!(a.advance(Phase::Changed, 1.25), Some(-0.25));
    }

    #[test]
    fn end_and_cancel_return_to_idle() {
        let mut a = Anchor::default();
        a.advance(Phase::Began, Point::new(3.0, 4.0));
        a.advance(Phase::Ended, Point::new(5.0, 5.0));
        assert_eq!(a, Anchor::Idle);
        assert_eq!(a.advance(Phase::Changed, Point::new(9.0, 9.0)), None);

        a.advance(Phase::Began, Point::new(0.0, 0.0));
        a.advance(Phase::Cancelled, Point::new(1.0, 1.0));
        assert_eq!(a, Anchor::Idle);
    }

    #[test]
    fn possible_and_failed_leave_anchor_alone() {
        let mut a = Anchor::default();
        a.advance(Phase::Began, 0.3);
        assert_eq!(a.advance(Phase::Possible, 9.0), None);
        assert_eq!(a.advance(Phase::Failed, 9.0), None);
        assert_eq!(a.value(), Some(0.3));
    }

    #[test]
    fn point_delta_is_vector_difference() {
        let mut a = Anchor::default();
        a.advance(Phase::Began, Point::new(10.0, 20.0));
        assert_eq!(a.advance(Phase::Changed, Point::new(13.0, 16.0)), Some(Point::new(3.0, -4.0)));
    }
}
