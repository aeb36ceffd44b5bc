use crate::model::GestureKind;

/// Whether two recognizers may be active during the same touch sequence.
/// Continuous gestures (pan, pinch, rotate) combine freely; taps are exclusive of everything.
pub fn allows_simultaneous(a: GestureKind, b: GestureKind) -> bool {
    a.is_continuous() && b.is_continuous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use GestureKind::*;

    const ALL: [GestureKind; 5] = [Pan, Pinch, Rotate, Tap, ResetTap];

    #[test]
    fn continuous_gestures_run_together() {
        for a in [Pan, Pinch, Rotate] {
            for b in [Pan, Pinch, Rotate] {
                assert!(allows_simultaneous(a, b), "{a:?} + {b:?}");
            }
        }
    }

    #[test]
    fn taps_are_exclusive() {
        for other in ALL {
            assert!(!allows_simultaneous(Tap, other));
            assert!(!allows_simultaneous(other, Tap));
            assert!(!allows_simultaneous(ResetTap, other));
            assert!(!allows_simultaneous(other, ResetTap));
        }
    }
}
