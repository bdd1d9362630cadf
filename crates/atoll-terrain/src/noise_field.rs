//! Seeded value-noise fields.
//!
//! All spatial noise in the pipeline — island boundary, river path, biome
//! edges, octave height layers — samples seeded value noise. Sub-fields are
//! decorrelated by deriving distinct seeds from the world seed with fixed
//! salts, so a single `u64` reproduces the entire world.

use glam::Vec2;
use noise::{NoiseFn, Value};

/// Salt for the shared height-octave noise field.
pub const HEIGHT_SALT: u64 = 0x0000_0000_51AB_0001;
/// Salt for the island boundary noise field.
pub const ISLAND_SALT: u64 = 0x0000_0000_51AB_0002;
/// Salts for the river path offset channels.
pub const RIVER_X_SALT: u64 = 0x0000_0000_51AB_0003;
/// See [`RIVER_X_SALT`].
pub const RIVER_Y_SALT: u64 = 0x0000_0000_51AB_0004;
/// Salts for the biome edge offset channels.
pub const SAMPLER_X_SALT: u64 = 0x0000_0000_51AB_0005;
/// See [`SAMPLER_X_SALT`].
pub const SAMPLER_Y_SALT: u64 = 0x0000_0000_51AB_0006;
/// Salt for the biome center jitter RNG.
pub const CENTER_SALT: u64 = 0x0000_0000_51AB_0007;

/// Derive a decorrelated sub-seed from the world seed and a fixed salt.
#[inline]
pub fn sub_seed(world_seed: u64, salt: u64) -> u32 {
    world_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(salt) as u32
}

/// A seeded 2-D value-noise field.
#[derive(Clone, Debug)]
pub struct ValueField {
    noise: Value,
}

impl ValueField {
    /// Create a field from a derived sub-seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Value::new(seed),
        }
    }

    /// Raw noise sample in `[-1, 1]`.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        self.noise.get([x as f64, y as f64]) as f32
    }

    /// Noise sample remapped to `[0, 1]`.
    #[inline]
    pub fn sample01(&self, x: f32, y: f32) -> f32 {
        (self.sample(x, y) + 1.0) * 0.5
    }
}

/// Two decorrelated noise channels forming a 2-D offset field.
///
/// Used wherever a sampling position is perturbed before a lookup: river
/// corridors and biome region boundaries.
#[derive(Clone, Debug)]
pub struct ValueField2 {
    x: ValueField,
    y: ValueField,
}

impl ValueField2 {
    /// Create an offset field from two derived sub-seeds.
    pub fn new(seed_x: u32, seed_y: u32) -> Self {
        Self {
            x: ValueField::new(seed_x),
            y: ValueField::new(seed_y),
        }
    }

    /// Offset vector for point `p`, sampled at `freq` and scaled by `amount`.
    ///
    /// Each component lies in `[-amount/2, amount/2]`, centered so the
    /// perturbation has no net drift.
    #[inline]
    pub fn offset(&self, p: Vec2, freq: f32, amount: f32) -> Vec2 {
        Vec2::new(
            (self.x.sample01(p.x * freq, p.y * freq) - 0.5) * amount,
            (self.y.sample01(p.x * freq, p.y * freq) - 0.5) * amount,
        )
    }
}
