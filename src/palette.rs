// Per-block fill resolution.
use rand::Rng;

use crate::rng::{random_hex_color, random_int};
use crate::settings::{Mode, Settings};

/// A resolved block fill. Channels are intentionally unclamped: values
/// outside 0-255 (or alpha outside 0-1) are legal here and truncate when the
/// surface paints them.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Hex(String),
    Rgba { r: i64, g: i64, b: i64, a: f64 },
}

/// Pick the fill for one block from the current settings.
///
/// DEFAULT ignores the channel settings entirely and returns a random hex
/// color. FROM-UI jitters each channel symmetrically around its base value.
/// Any other mode resolves to `None` and the block is skipped.
pub fn resolve<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Option<Fill> {
    match settings.mode {
        Mode::Default => Some(Fill::Hex(random_hex_color(rng))),
        Mode::FromUi => Some(Fill::Rgba {
            r: jitter(rng, settings.red_value, settings.red_max_randomness),
            g: jitter(rng, settings.green_value, settings.green_max_randomness),
            b: jitter(rng, settings.blue_value, settings.blue_max_randomness),
            a: jitter_real(rng, settings.alpha_value, settings.alpha_max_randomness),
        }),
        Mode::Other(_) => None,
    }
}

// Uniform over [base - max, base + max]: the negative offset is exact, the
// positive half is the biased closed-range sample.
fn jitter<R: Rng + ?Sized>(rng: &mut R, base: i64, max: i64) -> i64 {
    base - max + random_int(rng, max as f64)
}

fn jitter_real<R: Rng + ?Sized>(rng: &mut R, base: f64, max: f64) -> f64 {
    base - max.round() + random_int(rng, max) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn from_ui(settings: &mut Settings) {
        settings.mode = Mode::FromUi;
    }

    #[test]
    fn test_from_ui_jitter_bounds() {
        let mut settings = Settings::default();
        from_ui(&mut settings);
        settings.red_value = 100;
        settings.red_max_randomness = 30;
        settings.green_value = 300; // legal: unclamped
        settings.green_max_randomness = 5;
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..2_000 {
            match resolve(&settings, &mut rng) {
                Some(Fill::Rgba { r, g, .. }) => {
                    assert!((70..=130).contains(&r), "red {}", r);
                    assert!((295..=305).contains(&g), "green {}", g);
                }
                other => panic!("expected rgba, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let mut settings = Settings::default();
        from_ui(&mut settings);
        settings.red_value = 10;
        settings.green_value = 20;
        settings.blue_value = 30;
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            assert_eq!(
                resolve(&settings, &mut rng),
                Some(Fill::Rgba { r: 10, g: 20, b: 30, a: 1.0 })
            );
        }
    }

    #[test]
    fn test_default_mode_yields_hex() {
        let mut settings = Settings::default();
        settings.mode = Mode::Default;
        // Channel settings must not matter.
        settings.red_value = -999;
        let mut rng = StdRng::seed_from_u64(7);
        match resolve(&settings, &mut rng) {
            Some(Fill::Hex(color)) => {
                assert!(color.starts_with('#'));
                assert_eq!(color.len(), 7);
            }
            other => panic!("expected hex, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_mode_resolves_nothing() {
        let mut settings = Settings::default();
        settings.mode = Mode::Other("BOGUS".to_string());
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(resolve(&settings, &mut rng), None);
    }
}
