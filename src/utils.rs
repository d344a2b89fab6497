//! Small helpers shared across the crate

use rand::{SeedableRng, rngs::StdRng};

/// Deterministic generator for `Some(seed)`, entropy-seeded otherwise.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use bemora::utils::seeded_rng;
///
/// let a: u64 = seeded_rng(Some(9)).random();
/// let b: u64 = seeded_rng(Some(9)).random();
/// assert_eq!(a, b);
/// ```
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Split one base seed into independent streams (engine, opponent, maze...).
///
/// SplitMix64 finalizer over `base + stream`, so neighbouring streams do not
/// produce correlated generators.
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
