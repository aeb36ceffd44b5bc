// Small helpers shared by the model and the components.
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Seeded from the platform entropy source; falls back to a fixed seed if that is unavailable.
pub fn fresh_rng() -> SmallRng {
    let seed = getrandom::u64().unwrap_or_else(|e| {
        log::warn!("getrandom unavailable ({e}), using fixed seed");
        0x5eed
    });
    SmallRng::seed_from_u64(seed)
}

pub fn format_degrees(radians: f64) -> String {
    format!("{:.1}°", radians.to_degrees())
}

pub fn format_scale(scale: f64) -> String {
    format!("{:.2}×", scale)
}

pub fn format_offset(x: f64, y: f64) -> String {
    format!("{:.0}, {:.0}", x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn formats_readouts() {
        assert_eq!(format_degrees(PI / 2.0), "90.0°");
        assert_eq!(format_degrees(-PI), "-180.0°");
        assert_eq!(format_scale(1.0), "1.00×");
        assert_eq!(format_offset(12.4, -3.6), "12, -4");
    }
}
