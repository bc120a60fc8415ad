//! Seeded, stateless pseudo-random draws.
//!
//! Every value is a pure function of `(seed, index)`. Only integer arithmetic
//! feeds the hash, so a given seed produces the same layout on every platform.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_2: u64 = 0x94D0_49BB_1331_11EB;

/// 2^-53, maps the top 53 hash bits onto `[0, 1)`.
const UNIT_SCALE: f64 = 1.0 / 9_007_199_254_740_992.0;

/// Index offset for per-edge curvature draws, far above any placement index.
pub const CURVE_STREAM: u64 = 1 << 40;

/// Cantor pairing of two point ids, the per-edge offset into [`CURVE_STREAM`].
///
/// Depends on the endpoints alone, so adding or removing other points leaves
/// an edge's draw unchanged.
pub fn pair_index(a: usize, b: usize) -> u64 {
    let (a, b) = (a as u64, b as u64);
    let sum = a.wrapping_add(b);
    let triangle = if sum % 2 == 0 {
        (sum / 2).wrapping_mul(sum.wrapping_add(1))
    } else {
        sum.wrapping_mul(sum.wrapping_add(1) / 2)
    };
    triangle.wrapping_add(b)
}

/// Draws consumed per placement candidate: x jitter, y jitter, depth.
pub const DRAWS_PER_CANDIDATE: u64 = 3;

/// Returns a value in `[0, 1)` for `(seed, index)`.
///
/// Adjacent indices pass through a full avalanche mix, so neighbouring
/// candidates do not produce striped patterns.
pub fn sample(seed: u64, index: u64) -> f64 {
    let mut z = seed.wrapping_add(index.wrapping_mul(GOLDEN_GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(MIX_1);
    z = (z ^ (z >> 27)).wrapping_mul(MIX_2);
    z ^= z >> 31;
    (z >> 11) as f64 * UNIT_SCALE
}
