// Touch/mouse recognizer: turns raw contact lists into pan, pinch, rotate and tap actions.
use std::f64::consts::PI;

use crate::config::GestureConfig;
use crate::model::{GestureAction, GestureKind, Phase, Point};

use super::admission::allows_simultaneous;

/// Pointer id used when the mouse drives the recognizer.
pub const MOUSE_ID: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl Contact {
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

fn distance(a: Point, b: Point) -> f64 {
    let d = b - a;
    (d.x * d.x + d.y * d.y).sqrt()
}

/// Press that may still turn out to be a tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapTracker {
    start: Point,
    started_at: f64,
    failed: bool,
}

impl TapTracker {
    pub fn new(start: Point, now_ms: f64) -> Self {
        Self { start, started_at: now_ms, failed: false }
    }

    pub fn track(&mut self, point: Point, slop_px: f64) {
        if distance(self.start, point) > slop_px {
            self.failed = true;
        }
    }

    pub fn fail(&mut self) {
        self.failed = true;
    }

    pub fn recognized(&self, now_ms: f64, max_ms: f64) -> bool {
        !self.failed && now_ms - self.started_at <= max_ms
    }
}

/// Two-finger tracking for pinch and rotate.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PairTrack {
    ids: (i32, i32),
    start_dist: f64,
    last_raw_angle: f64,
    /// Rotation since the pair landed, unwrapped across ±π.
    angle: f64,
}

impl PairTrack {
    fn locate(&self, contacts: &[Contact]) -> Option<(Point, Point)> {
        let a = contacts.iter().find(|c| c.id == self.ids.0)?;
        let b = contacts.iter().find(|c| c.id == self.ids.1)?;
        Some((a.point(), b.point()))
    }
}

fn raw_angle(a: Point, b: Point) -> f64 {
    let d = b - a;
    d.y.atan2(d.x)
}

/// Gesture recognizer state for the surface, fed one DOM event at a time.
#[derive(Default, Debug, Clone)]
pub struct TouchState {
    config: GestureConfig,
    contacts: Vec<Contact>,
    tap: Option<TapTracker>,
    /// The single finger that drives pan; other contacts only feed pinch/rotate.
    pan_id: Option<i32>,
    pan_origin: Point,
    pan_active: bool,
    /// Added to the pan finger's position so the reported point stays continuous
    /// when pan is handed to another finger.
    pan_correction: Point,
    pair: Option<PairTrack>,
}

impl TouchState {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, ..Default::default() }
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        self.contacts.is_empty()
    }

    fn pan_point(&self, contacts: &[Contact]) -> Option<Point> {
        let id = self.pan_id?;
        contacts
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.point() + self.pan_correction)
    }

    /// The pan finger lifted while others stay down: continue pan on the first remaining one.
    fn hand_off_pan(&mut self, remaining: &[Contact]) {
        let Some(id) = self.pan_id else {
            return;
        };
        if remaining.iter().any(|c| c.id == id) {
            return;
        }
        if let (Some(before), Some(next)) = (self.pan_point(&self.contacts), remaining.first()) {
            self.pan_id = Some(next.id);
            self.pan_correction = before - next.point();
        }
    }

    fn active_kinds(&self) -> Vec<GestureKind> {
        let mut kinds = Vec::with_capacity(3);
        if self.pan_active {
            kinds.push(GestureKind::Pan);
        }
        if self.pair.is_some() {
            kinds.push(GestureKind::Pinch);
            kinds.push(GestureKind::Rotate);
        }
        kinds
    }

    /// Consult the admission policy before `kind` begins: end anything it cannot coexist with
    /// and fail a pending tap.
    fn admit(&mut self, kind: GestureKind, out: &mut Vec<GestureAction>) {
        if let Some(tap) = self.tap.as_mut() {
            if !allows_simultaneous(GestureKind::Tap, kind) {
                tap.fail();
            }
        }
        for other in self.active_kinds() {
            if !allows_simultaneous(other, kind) {
                self.finish(other, Phase::Ended, out);
            }
        }
    }

    fn finish(&mut self, kind: GestureKind, phase: Phase, out: &mut Vec<GestureAction>) {
        match kind {
            GestureKind::Pan if self.pan_active => {
                let point = self.pan_point(&self.contacts).unwrap_or_default();
                self.pan_active = false;
                out.push(GestureAction::Pan { phase, point });
            }
            GestureKind::Pinch | GestureKind::Rotate => {
                if let Some(pair) = self.pair.take() {
                    let ratio = self
                        .current_ratio(&pair, &self.contacts)
                        .unwrap_or(1.0);
                    out.push(GestureAction::Pinch { phase, ratio });
                    out.push(GestureAction::Rotate { phase, angle: pair.angle });
                }
            }
            _ => {}
        }
    }

    fn begin_pan(&mut self, point: Point, out: &mut Vec<GestureAction>) {
        if self.pan_active {
            return;
        }
        self.admit(GestureKind::Pan, out);
        self.pan_active = true;
        out.push(GestureAction::Pan { phase: Phase::Began, point });
    }

    fn begin_pair(&mut self, contacts: &[Contact], out: &mut Vec<GestureAction>) {
        if self.pair.is_some() || contacts.len() < 2 {
            return;
        }
        let (a, b) = (contacts[0], contacts[1]);
        let dist = distance(a.point(), b.point());
        if dist < self.config.min_pinch_distance_px {
            return;
        }
        self.admit(GestureKind::Pinch, out);
        self.admit(GestureKind::Rotate, out);
        self.pair = Some(PairTrack {
            ids: (a.id, b.id),
            start_dist: dist,
            last_raw_angle: raw_angle(a.point(), b.point()),
            angle: 0.0,
        });
        out.push(GestureAction::Pinch { phase: Phase::Began, ratio: 1.0 });
        out.push(GestureAction::Rotate { phase: Phase::Began, angle: 0.0 });
    }

    fn current_ratio(&self, pair: &PairTrack, contacts: &[Contact]) -> Option<f64> {
        let (a, b) = pair.locate(contacts)?;
        Some(distance(a, b) / pair.start_dist)
    }

    /// `touchstart` / `mousedown`: `contacts` is the full list after the new press.
    pub fn start(&mut self, contacts: &[Contact], now_ms: f64) -> Vec<GestureAction> {
        let mut out = Vec::new();
        if self.contacts.is_empty() {
            let Some(first) = contacts.first() else {
                return out;
            };
            self.tap = Some(TapTracker::new(first.point(), now_ms));
            self.pan_id = Some(first.id);
            self.pan_origin = first.point();
            self.pan_correction = Point::default();
            self.pan_active = false;
        }
        if contacts.len() > 1 {
            if let Some(tap) = self.tap.as_mut() {
                tap.fail();
            }
            self.begin_pair(contacts, &mut out);
        }
        self.contacts = contacts.to_vec();
        out
    }

    /// `touchmove` / `mousemove` while pressed.
    pub fn moved(&mut self, contacts: &[Contact], _now_ms: f64) -> Vec<GestureAction> {
        let mut out = Vec::new();
        if self.contacts.is_empty() || contacts.is_empty() {
            return out;
        }

        if let Some(point) = self.pan_point(contacts) {
            if let Some(tap) = self.tap.as_mut() {
                tap.track(point, self.config.tap_slop_px);
            }
            if self.pan_active {
                out.push(GestureAction::Pan { phase: Phase::Changed, point });
            } else if distance(self.pan_origin, point) > self.config.pan_slop_px {
                self.begin_pan(point, &mut out);
            }
        }

        if self.pair.is_none() {
            self.begin_pair(contacts, &mut out);
        } else if let Some(mut pair) = self.pair {
            if let Some((a, b)) = pair.locate(contacts) {
                let raw = raw_angle(a, b);
                let mut step = raw - pair.last_raw_angle;
                if step > PI {
                    step -= 2.0 * PI;
                } else if step <= -PI {
                    step += 2.0 * PI;
                }
                pair.angle += step;
                pair.last_raw_angle = raw;
                self.pair = Some(pair);
                out.push(GestureAction::Pinch {
                    phase: Phase::Changed,
                    ratio: distance(a, b) / pair.start_dist,
                });
                out.push(GestureAction::Rotate { phase: Phase::Changed, angle: pair.angle });
            }
        }

        self.contacts = contacts.to_vec();
        out
    }

    /// `touchend` / `mouseup`: `remaining` is the list of contacts still down.
    pub fn end(&mut self, remaining: &[Contact], now_ms: f64) -> Vec<GestureAction> {
        let mut out = Vec::new();
        if self.contacts.is_empty() {
            return out;
        }
        if let Some(pair) = self.pair {
            if pair.locate(remaining).is_none() {
                self.finish(GestureKind::Pinch, Phase::Ended, &mut out);
            }
        }
        if remaining.is_empty() {
            self.finish(GestureKind::Pan, Phase::Ended, &mut out);
            if let Some(tap) = self.tap.take() {
                if tap.recognized(now_ms, self.config.tap_max_ms) {
                    out.push(GestureAction::Tap);
                }
            }
            self.pan_id = None;
            self.contacts.clear();
            return out;
        }
        self.hand_off_pan(remaining);
        self.contacts = remaining.to_vec();
        self.begin_pair(remaining, &mut out);
        out
    }

    /// `touchcancel`: every active gesture is cancelled and the sequence forgotten.
    pub fn cancel(&mut self) -> Vec<GestureAction> {
        let mut out = Vec::new();
        self.finish(GestureKind::Pan, Phase::Cancelled, &mut out);
        self.finish(GestureKind::Pinch, Phase::Cancelled, &mut out);
        self.tap = None;
        self.pan_id = None;
        self.contacts.clear();
        out
    }
}

/// Tap detection for presses on the stage background; a recognized tap resets the surface.
#[derive(Default, Debug, Clone)]
pub struct BackgroundTap {
    config: GestureConfig,
    pending: Option<TapTracker>,
}

impl BackgroundTap {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, pending: None }
    }

    pub fn press(&mut self, point: Point, now_ms: f64) {
        self.pending = Some(TapTracker::new(point, now_ms));
    }

    /// A second finger on the background is not a tap.
    pub fn fail(&mut self) {
        if let Some(tap) = self.pending.as_mut() {
            tap.fail();
        }
    }

    pub fn moved(&mut self, point: Point) {
        if let Some(tap) = self.pending.as_mut() {
            tap.track(point, self.config.tap_slop_px);
        }
    }

    pub fn release(&mut self, now_ms: f64) -> Option<GestureAction> {
        let tap = self.pending.take()?;
        tap.recognized(now_ms, self.config.tap_max_ms)
            .then_some(GestureAction::ResetTap)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
