//! Xorshift64 pseudo-random number generator.
//!
//! Every source of randomness in the engine (spawn positions, depth
//! assignment, oscillator phases, wind retargeting, palette picks) draws
//! from one of these, seeded per particle system. The algorithm is pure
//! integer arithmetic, so a given seed produces the same sequence on every
//! platform, which keeps scenario tests exact even though cross-run
//! reproducibility is not a requirement of the engine itself.

use serde::{Deserialize, Serialize};

/// Seedable xorshift64 generator with the standard (13, 7, 17) shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Substitute seed for 0, which is the all-zeros fixed point of xorshift.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a generator from `seed`. A seed of 0 is replaced with a
    /// non-zero fallback.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1), built from the upper 53 bits for full
    /// mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform usize in [0, max) via modulo reduction. Bias is negligible
    /// at 64-bit state width.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }
}
