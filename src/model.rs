//! Core data models for the gesture playground.
//! The transform controller lives here: surface state, fill color and the three gesture anchors,
//! driven by `GestureAction` values and exposed to the UI as a yew reducer.

use std::ops::{Add, AddAssign, Sub};
use std::rc::Rc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use yew::Reducible;

use crate::state::{Anchor, palette};
use crate::util::fresh_rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Lifecycle phase of a continuous gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Reported while a recognizer is still deciding; carries no motion.
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    /// Recognizer gave up before beginning.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Pan,
    Pinch,
    Rotate,
    /// Single tap on the surface.
    Tap,
    /// Tap on the background.
    ResetTap,
}

impl GestureKind {
    pub fn is_continuous(self) -> bool {
        matches!(self, GestureKind::Pan | GestureKind::Pinch | GestureKind::Rotate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GestureAction {
    /// `point` is the pan location in stage pixels.
    Pan { phase: Phase, point: Point },
    /// `ratio` is cumulative for the gesture (1.0 at begin).
    Pinch { phase: Phase, ratio: f64 },
    /// `angle` in radians, cumulative for the gesture (0.0 at begin).
    Rotate { phase: Phase, angle: f64 },
    Tap,
    ResetTap,
}

impl GestureAction {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureAction::Pan { .. } => GestureKind::Pan,
            GestureAction::Pinch { .. } => GestureKind::Pinch,
            GestureAction::Rotate { .. } => GestureKind::Rotate,
            GestureAction::Tap => GestureKind::Tap,
            GestureAction::ResetTap => GestureKind::ResetTap,
        }
    }
}

/// Visual transform of the rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    /// Radians.
    pub rotation: f64,
}

impl SurfaceState {
    pub const IDENTITY: SurfaceState = SurfaceState {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
        rotation: 0.0,
    };

    /// Scale then rotate. Offset never enters this string; see `css_position`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate(-50%, -50%) scale({}) rotate({}rad)",
            self.scale, self.rotation
        )
    }

    /// Positional properties placing the surface relative to the stage center.
    pub fn css_position(&self) -> String {
        format!(
            "left:calc(50% + {}px); top:calc(50% + {}px);",
            self.offset_x, self.offset_y
        )
    }
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformController {
    pub surface: SurfaceState,
    /// Palette index of the current fill; `None` until the first tap.
    pub fill: Option<usize>,
    pan: Anchor<Point>,
    pinch: Anchor<f64>,
    rotate: Anchor<f64>,
    /// Bumped on every observable change; shown in the HUD as the update count.
    pub version: u64,
}

impl TransformController {
    pub fn fill_color(&self) -> &'static str {
        palette::fill_for(self.fill)
    }

    pub fn is_tracking(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Pan => self.pan.is_tracking(),
            GestureKind::Pinch => self.pinch.is_tracking(),
            GestureKind::Rotate => self.rotate.is_tracking(),
            GestureKind::Tap | GestureKind::ResetTap => false,
        }
    }

    pub fn handle_pan(&mut self, phase: Phase, point: Point) -> bool {
        match self.pan.advance(phase, point) {
            Some(delta) => {
                self.surface.offset_x += delta.x;
                self.surface.offset_y += delta.y;
                true
            }
            None => false,
        }
    }

    pub fn handle_pinch(&mut self, phase: Phase, ratio: f64) -> bool {
        match self.pinch.advance(phase, ratio) {
            Some(delta) => {
                // ratio is cumulative per gesture, so accumulate its increments
                self.surface.scale += delta;
                true
            }
            None => false,
        }
    }

    pub fn handle_rotate(&mut self, phase: Phase, angle: f64) -> bool {
        match self.rotate.advance(phase, angle) {
            Some(delta) => {
                self.surface.rotation += delta;
                true
            }
            None => false,
        }
    }

    pub fn handle_tap<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.fill = Some(palette::pick_index(rng));
        true
    }

    /// Back to identity. In-flight anchors are kept: each change re-anchors,
    /// so the next delta is only the motion since the previous event.
    pub fn handle_reset(&mut self) -> bool {
        self.surface = SurfaceState::IDENTITY;
        true
    }

    /// Route one action to its handler. Returns whether observable state changed.
    pub fn apply<R: Rng>(&mut self, action: GestureAction, rng: &mut R) -> bool {
        self.apply_with(action, || rng)
    }

    /// Like `apply`, but the RNG is only built when a tap needs one.
    pub fn apply_with<R: Rng>(&mut self, action: GestureAction, make_rng: impl FnOnce() -> R) -> bool {
        let changed = match action {
            GestureAction::Pan { phase, point } => self.handle_pan(phase, point),
            GestureAction::Pinch { phase, ratio } => self.handle_pinch(phase, ratio),
            GestureAction::Rotate { phase, angle } => self.handle_rotate(phase, angle),
            GestureAction::Tap => self.handle_tap(&mut make_rng()),
            GestureAction::ResetTap => self.handle_reset(),
        };
        if changed {
            self.version = self.version.wrapping_add(1);
        }
        changed
    }
}

impl Reducible for TransformController {
    type Action = GestureAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        let anchors_before = (new.pan, new.pinch, new.rotate);
        let changed = new.apply_with(action, fresh_rng);
        if changed {
            log::debug!(
                "{:?} -> {}",
                action.kind(),
                serde_json::to_string(&new.surface).unwrap_or_default()
            );
        } else if anchors_before == (new.pan, new.pinch, new.rotate) {
            // nothing observable or internal moved
            return self;
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const EPS: f64 = 1e-9;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn starts_at_identity() {
        let c = TransformController::default();
        assert_eq!(c.surface, SurfaceState::IDENTITY);
        assert_eq!(c.fill, None);
        assert_eq!(c.fill_color(), palette::DEFAULT_FILL);
    }

    #[test]
    fn pan_offset_is_telescoping_sum() {
        let path = [(10.0, 10.0), (12.5, 9.0), (20.0, 4.0), (18.0, 30.0)];
        let mut fine = TransformController::default();
        fine.handle_pan(Phase::Began, Point::new(path[0].0, path[0].1));
        for &(x, y) in &path[1..] {
            fine.handle_pan(Phase::Changed, Point::new(x, y));
        }
        fine.handle_pan(Phase::Ended, Point::new(18.0, 30.0));

        let mut coarse = TransformController::default();
        coarse.handle_pan(Phase::Began, Point::new(10.0, 10.0));
        coarse.handle_pan(Phase::Changed, Point::new(18.0, 30.0));
        coarse.handle_pan(Phase::Ended, Point::new(18.0, 30.0));

        assert!(close(fine.surface.offset_x, 8.0));
        assert!(close(fine.surface.offset_y, 20.0));
        assert!(close(fine.surface.offset_x, coarse.surface.offset_x));
        assert!(close(fine.surface.offset_y, coarse.surface.offset_y));
    }

    #[test]
    fn pinch_accumulates_ratio_difference() {
        let mut c = TransformController::default();
        c.surface.scale = 1.5;
        c.handle_pinch(Phase::Began, 1.0);
        c.handle_pinch(Phase::Changed, 1.2);
        c.handle_pinch(Phase::Changed, 1.7);
        c.handle_pinch(Phase::Ended, 1.7);
        assert!(close(c.surface.scale, 1.5 + (1.7 - 1.0)));
    }

    #[test]
    fn rotate_accumulates_angle_difference() {
        let mut c = TransformController::default();
        c.handle_rotate(Phase::Began, 0.0);
        c.handle_rotate(Phase::Changed, 0.4);
        c.handle_rotate(Phase::Changed, -0.1);
        c.handle_rotate(Phase::Cancelled, -0.1);
        assert!(close(c.surface.rotation, -0.1));

        // a second gesture builds on the first
        c.handle_rotate(Phase::Began, 0.0);
        c.handle_rotate(Phase::Changed, 0.3);
        assert!(close(c.surface.rotation, 0.2));
    }

    #[test]
    fn orphan_changes_are_no_ops() {
        let mut c = TransformController::default();
        let mut r = rng();
        assert!(!c.apply(GestureAction::Pan { phase: Phase::Changed, point: Point::new(5.0, 5.0) }, &mut r));
        assert!(!c.apply(GestureAction::Pinch { phase: Phase::Changed, ratio: 3.0 }, &mut r));
        assert!(!c.apply(GestureAction::Rotate { phase: Phase::Changed, angle: 1.0 }, &mut r));
        assert_eq!(c, TransformController::default());

        c.handle_pan(Phase::Began, Point::new(0.0, 0.0));
        c.handle_pan(Phase::Ended, Point::new(0.0, 0.0));
        assert!(!c.handle_pan(Phase::Changed, Point::new(40.0, 40.0)));
        assert_eq!(c.surface, SurfaceState::IDENTITY);
    }

    #[test]
    fn reset_restores_identity_from_any_state() {
        let mut c = TransformController::default();
        let mut r = rng();
        c.surface = SurfaceState { offset_x: -30.0, offset_y: 12.0, scale: 0.2, rotation: 7.0 };
        c.apply(GestureAction::Tap, &mut r);
        assert!(c.apply(GestureAction::ResetTap, &mut r));
        assert_eq!(c.surface, SurfaceState::IDENTITY);
        // fill is not part of the transform
        assert!(c.fill.is_some());
    }

    #[test]
    fn reset_mid_drag_continues_without_jump() {
        let mut c = TransformController::default();
        c.handle_pan(Phase::Began, Point::new(0.0, 0.0));
        c.handle_pan(Phase::Changed, Point::new(100.0, 50.0));
        c.handle_reset();
        assert!(c.is_tracking(GestureKind::Pan));
        c.handle_pan(Phase::Changed, Point::new(102.0, 51.0));
        assert!(close(c.surface.offset_x, 2.0));
        assert!(close(c.surface.offset_y, 1.0));
    }

    #[test]
    fn taps_visit_every_palette_entry() {
        let mut c = TransformController::default();
        let mut r = rng();
        let mut seen = [0usize; palette::PALETTE.len()];
        for _ in 0..400 {
            c.apply(GestureAction::Tap, &mut r);
            seen[c.fill.unwrap()] += 1;
        }
        assert!(seen.iter().all(|n| *n > 0), "{seen:?}");
        assert_eq!(c.surface, SurfaceState::IDENTITY);
    }

    #[test]
    fn pan_and_pinch_changes_commute() {
        let pan = GestureAction::Pan { phase: Phase::Changed, point: Point::new(7.0, -3.0) };
        let pinch = GestureAction::Pinch { phase: Phase::Changed, ratio: 1.4 };

        let mut base = TransformController::default();
        let mut r = rng();
        base.apply(GestureAction::Pan { phase: Phase::Began, point: Point::new(1.0, 1.0) }, &mut r);
        base.apply(GestureAction::Pinch { phase: Phase::Began, ratio: 1.0 }, &mut r);

        let mut a = base.clone();
        a.apply(pan, &mut r);
        a.apply(pinch, &mut r);
        let mut b = base.clone();
        b.apply(pinch, &mut r);
        b.apply(pan, &mut r);

        assert_eq!(a.surface, b.surface);
        assert!(close(a.surface.offset_x, 6.0));
        assert!(close(a.surface.scale, 1.4));
    }

    #[test]
    fn concurrent_gestures_touch_disjoint_fields() {
        let mut c = TransformController::default();
        c.handle_pan(Phase::Began, Point::new(0.0, 0.0));
        c.handle_pinch(Phase::Began, 1.0);
        c.handle_rotate(Phase::Began, 0.0);
        c.handle_rotate(Phase::Changed, 0.5);
        c.handle_pan(Phase::Changed, Point::new(3.0, 4.0));
        c.handle_pinch(Phase::Changed, 0.5);
        assert!(close(c.surface.offset_x, 3.0));
        assert!(close(c.surface.offset_y, 4.0));
        assert!(close(c.surface.scale, 0.5));
        assert!(close(c.surface.rotation, 0.5));
    }

    #[test]
    fn version_moves_only_on_observable_change() {
        let mut c = TransformController::default();
        let mut r = rng();
        c.apply(GestureAction::Rotate { phase: Phase::Began, angle: 0.0 }, &mut r);
        assert_eq!(c.version, 0);
        c.apply(GestureAction::Rotate { phase: Phase::Changed, angle: 0.1 }, &mut r);
        assert_eq!(c.version, 1);
    }

    #[test]
    fn only_taps_build_an_rng() {
        let mut c = TransformController::default();
        let built = std::cell::Cell::new(0);
        let make = || {
            built.set(built.get() + 1);
            SmallRng::seed_from_u64(3)
        };
        c.apply_with(GestureAction::Pan { phase: Phase::Began, point: Point::new(0.0, 0.0) }, &make);
        c.apply_with(GestureAction::Pan { phase: Phase::Changed, point: Point::new(4.0, 0.0) }, &make);
        c.apply_with(GestureAction::ResetTap, &make);
        assert_eq!(built.get(), 0);
        c.apply_with(GestureAction::Tap, &make);
        assert_eq!(built.get(), 1);
        assert!(c.fill.is_some());
    }

    #[test]
    fn reducer_returns_same_state_for_no_op() {
        let state = Rc::new(TransformController::default());
        let next = state.clone().reduce(GestureAction::Pinch { phase: Phase::Changed, ratio: 2.0 });
        assert!(Rc::ptr_eq(&state, &next));

        let began = state.clone().reduce(GestureAction::Pinch { phase: Phase::Began, ratio: 1.0 });
        assert!(!Rc::ptr_eq(&state, &began));
        assert!(began.is_tracking(GestureKind::Pinch));
    }

    #[test]
    fn css_keeps_offset_out_of_transform() {
        let s = SurfaceState { offset_x: 12.0, offset_y: -4.5, scale: 2.0, rotation: 0.25 };
        let t = s.css_transform();
        assert_eq!(t, "translate(-50%, -50%) scale(2) rotate(0.25rad)");
        assert!(t.find("scale").unwrap() < t.find("rotate").unwrap());
        assert!(!t.contains("12"));
        assert_eq!(s.css_position(), "left:calc(50% + 12px); top:calc(50% + -4.5px);");
    }
}
