// Bounded random primitives shared by palette resolution, randomize and
// per-block rotation.
use rand::Rng;

const HEX_DIGITS: &[u8] = b"0123456789ABCDEF";

/// Random integer in the closed range `[0, max]`, produced by rounding a
/// continuous uniform sample. Rounding gives each endpoint half the mass of
/// an interior integer; the jitter math is calibrated to that distribution,
/// so don't swap this for a uniform-integer sampler.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, max: f64) -> i64 {
    (rng.random::<f64>() * max).round() as i64
}

/// Random `#RRGGBB` color, each digit drawn independently from the 16 hex
/// symbols.
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())] as char);
    }
    color
}
