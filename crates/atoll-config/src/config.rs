//! World configuration with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Curve, error::ConfigError};

/// Top-level world configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// General generation settings.
    pub general: GeneralConfig,
    /// Island mask and distance-field settings.
    pub island: IslandConfig,
    /// River carving settings.
    pub river: RiverConfig,
    /// Biome classification settings.
    pub biome_grid: BiomeGridConfig,
    /// Height compositing and mesh settings.
    pub mesh: MeshConfig,
    /// Streamer settings.
    pub streamer: StreamerConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// General generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// World seed for deterministic generation.
    pub seed: u64,
    /// Vertices per tile side. Must be a multiple of the 64-lane group size.
    pub resolution: usize,
}

/// Island mask and distance-field settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IslandConfig {
    /// Water mask resolution. Must be a multiple of the 64-lane group size.
    /// Resampled to tile resolution and position when consumed.
    pub island_resolution: usize,
    /// Frequency of the noise added to the island boundary.
    pub island_noise_scale: f32,
    /// How round the island is: 1 is a perfect circle, 0 fully noise-driven.
    pub island_roundness: f32,
    /// How fast the influence of the water drops off.
    pub distance_field_effect: f32,
    /// Number of distance-transform relaxation passes.
    pub edt_iterations: u32,
    /// Curve mapping normalized water distance to the shore blend weight.
    pub shore_curve: Curve,
}

/// River carving settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiverConfig {
    /// Corridor half-width in map-normalized units.
    pub river_width: f32,
    /// Jitter of the river midpoint relative to the map center.
    pub river_center_jitter: f32,
    /// Frequency of the noise perturbing the river path.
    pub river_noise_scale: f32,
    /// Amplitude of the noise perturbing the river path.
    pub river_noise_amount: f32,
}

/// Biome classification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeGridConfig {
    /// Point radius of the pseudo-Voronoi biome grid; center count is
    /// `floor(1 / radius)^2`.
    pub biome_center_radius: f32,
    /// How much biome centers are jittered, as a factor of the radius.
    pub biome_grid_distortion: f32,
    /// Biome edge noise frequency.
    pub sampler_noise_freq: f32,
    /// Biome edge noise amplitude.
    pub sampler_noise_factor: f32,
}

/// Height compositing and mesh settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Maximum terrain height in world units.
    pub max_height: f32,
    /// Height of one terrace step when leveling is enabled.
    pub level_height: f32,
}

/// Quadtree streamer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamerConfig {
    /// Total side length of the streamed map in world units.
    pub map_size: u32,
    /// Maximum subdivision depth; minimum tile size is `map_size / 2^max_depth`.
    pub max_depth: u8,
}

/// Which intermediate buffer the debug visualization renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum DebugLayer {
    /// Composited height field.
    HeightMap,
    /// Island + river water mask.
    WaterMask,
    /// Normalized water distance field.
    DistanceField,
    /// UV gradient test pattern.
    Uvs,
    /// Raw biome region indices.
    Regions,
    /// Blended biome weights.
    Biomes,
    /// Shore blend mask.
    Shore,
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Whether the biome shaping curve is applied.
    pub apply_shaping: bool,
    /// Whether the water mask is applied to the height fields.
    pub add_mask: bool,
    /// Whether distance masking weights all octaves. If false, octaves that
    /// contribute less than 1% of the total height are weighted individually.
    pub mask_all_octaves: bool,
    /// Whether the composited terrain is quantized into terraces.
    pub level_terrain: bool,
    /// Debug layer to render, if any.
    pub layer: Option<DebugLayer>,
    /// Skip mesh extraction and only produce the debug layer.
    pub layer_only: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            resolution: 64,
        }
    }
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            island_resolution: 256,
            island_noise_scale: 20.0,
            island_roundness: 0.5,
            distance_field_effect: 0.3,
            edt_iterations: 32,
            shore_curve: Curve::linear(0.0, 1.0, 1.0, 0.0),
        }
    }
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            river_width: 0.01,
            river_center_jitter: 0.2,
            river_noise_scale: 10.0,
            river_noise_amount: 0.2,
        }
    }
}

impl Default for BiomeGridConfig {
    fn default() -> Self {
        Self {
            biome_center_radius: 0.2,
            biome_grid_distortion: 2.0,
            sampler_noise_freq: 30.0,
            sampler_noise_factor: 0.2,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            max_height: 20.0,
            level_height: 1.0,
        }
    }
}

impl Default for StreamerConfig {
    fn default() -> Self {
        Self {
            map_size: 256,
            max_depth: 4,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            apply_shaping: false,
            add_mask: true,
            mask_all_octaves: true,
            level_terrain: false,
            layer: None,
            layer_only: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl WorldConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("world.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                ConfigError::Read {
                    path: config_path.clone(),
                    source: e,
                }
            })?;
            let config: WorldConfig = ron::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: config_path.clone(),
                source: e,
            })?;
            log::info!("Loaded world config from {}", config_path.display());
            Ok(config)
        } else {
            let config = WorldConfig::default();
            config.save(config_dir)?;
            log::info!("Created default world config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `world.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join("world.ron");
        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Write {
            path: config_path.clone(),
            source: e,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|e| ConfigError::Write {
            path: config_path,
            source: e,
        })?;
        Ok(())
    }
}
