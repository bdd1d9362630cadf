//! Biome noise parameters, authored as standalone RON assets.

use serde::{Deserialize, Serialize};

use crate::Curve;

/// Immutable parameter set for one biome's height noise.
///
/// Loaded once at world initialization and never mutated at runtime. The
/// beach/shore biome is a regular `BiomeConfig` blended in by the shore mask
/// rather than by the biome classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Human-readable biome name (e.g., "highlands").
    pub name: String,
    /// Base noise frequency. Higher values change faster across the map.
    pub scale: f32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
    /// Shaping curve remapping normalized height, baked to a 100-sample table.
    pub height_curve: Curve,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            name: "biome".to_string(),
            scale: 5.0,
            octaves: 8,
            lacunarity: 2.0,
            persistence: 0.5,
            height_curve: Curve::identity(),
        }
    }
}

impl BiomeConfig {
    /// A named config with default noise parameters.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}
