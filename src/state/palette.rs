// Fill colors the surface cycles through on single tap.
use rand::Rng;

pub const DEFAULT_FILL: &str = "#007AFF";

pub const PALETTE: [&str; 5] = ["#700331", "#8E5AF7", "#007AFF", "#F3AF22", "#EC3C1A"];

/// Uniform pick over the palette; consecutive picks may repeat.
pub fn pick_index<R: Rng>(rng: &mut R) -> usize {
    rng.random_range(0..PALETTE.len())
}

pub fn fill_for(index: Option<usize>) -> &'static str {
    index
        .and_then(|i| PALETTE.get(i).copied())
        .unwrap_or(DEFAULT_FILL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn picks_cover_whole_palette() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; PALETTE.len()];
        for _ in 0..500 {
            seen[pick_index(&mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s), "{seen:?}");
    }

    #[test]
    fn fill_falls_back_to_default() {
        assert_eq!(fill_for(None), DEFAULT_FILL);
        assert_eq!(fill_for(Some(99)), DEFAULT_FILL);
        assert_eq!(fill_for(Some(3)), "#F3AF22");
    }
}
