//! Floor seed derivation and uniform draws over an injected random source.

use rand_chacha::rand_core::Rng;

const FLOOR_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Mixes a run seed and a floor number into the seed for that floor's generator.
pub fn derive_floor_seed(run_seed: u64, floor: u32) -> u64 {
    let mut mixed = run_seed ^ FLOOR_SALT;
    mixed ^= u64::from(floor).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Uniform value in `[0, 1)` built from the top 53 bits of one draw.
pub(super) fn unit_f64<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

pub(super) fn random_usize<R: Rng + ?Sized>(rng: &mut R, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value) as u64 + 1;
    min_value + (rng.next_u64() % range_size) as usize
}

pub(super) fn random_u32<R: Rng + ?Sized>(rng: &mut R, min_value: u32, max_value: u32) -> u32 {
    debug_assert!(min_value <= max_value);
    let range_size = u64::from(max_value - min_value) + 1;
    min_value + (rng.next_u64() % range_size) as u32
}

pub(super) fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    unit_f64(rng) < chance
}

pub(super) fn choose<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random_usize(rng, 0, items.len() - 1))
}
