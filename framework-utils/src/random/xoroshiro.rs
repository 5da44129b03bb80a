//! xoroshiro128++ generator.

use super::Random;

/// Fallback state used when both halves would be zero, which is a fixed point.
const ZERO_STATE_LO: u64 = 0x9E37_79B9_7F4A_7C15;
const ZERO_STATE_HI: u64 = 0x6A09_E667_F3BC_C909;

/// A fast 128-bit state generator.
///
/// Not cryptographically secure. Two generators built from the same seed
/// produce the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoroshiro {
    lo: u64,
    hi: u64,
}

impl Xoroshiro {
    /// Creates a generator from raw state, replacing the all-zero state.
    #[must_use]
    pub const fn new(lo: u64, hi: u64) -> Self {
        if lo | hi == 0 {
            Self {
                lo: ZERO_STATE_LO,
                hi: ZERO_STATE_HI,
            }
        } else {
            Self { lo, hi }
        }
    }

    /// Creates a generator by expanding a 64-bit seed with SplitMix64.
    #[must_use]
    pub const fn from_seed(seed: u64) -> Self {
        let mut state = seed;
        let lo = split_mix64(&mut state);
        let hi = split_mix64(&mut state);
        Self::new(lo, hi)
    }

    /// Creates a generator seeded from the operating system's entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Derives an independent generator, e.g. to hand to another thread.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let lo = self.next_u64();
        let hi = self.next_u64();
        Self::new(lo, hi)
    }
}

impl Random for Xoroshiro {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let s0 = self.lo;
        let mut s1 = self.hi;
        let result = s0.wrapping_add(s1).rotate_left(17).wrapping_add(s0);

        s1 ^= s0;
        self.lo = s0.rotate_left(49) ^ s1 ^ (s1 << 21);
        self.hi = s1.rotate_left(28);
        result
    }
}

const fn split_mix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
