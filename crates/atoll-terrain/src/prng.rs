//! Deterministic scalar PRNG for per-world random draws.
//!
//! The river layout (center jitter, start/end edge picks) must reproduce
//! bit-for-bit from the world seed, independent of platform libc. The hash is
//! the classic `fract(sin(x * 12.9898 + 78.233) * 43758.5453)` transform with
//! `sin` taken from `libm` so the sequence is identical everywhere.

/// Seeded scalar noise generator with a single `f32` state.
///
/// Given the same initial seed and the same sequence of calls, the output
/// sequence is bit-for-bit reproducible.
#[derive(Clone, Debug)]
pub struct Prng {
    state: f32,
}

impl Prng {
    /// Create a generator from a seed value.
    pub fn new(seed: f32) -> Self {
        Self { state: seed }
    }

    /// Next pseudo-random value in `[0, 1)`, advancing the state.
    pub fn next(&mut self) -> f32 {
        self.state = (libm::sinf(self.state * 12.9898 + 78.233) * 43758.5453).abs();
        self.state - self.state.floor()
    }

    /// Next pseudo-random value linearly remapped into `[min, max)`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next()
    }
}
