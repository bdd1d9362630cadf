//! Procedural island terrain generation: seeded noise, water masking,
//! distance fields, biome blending, and the tile generation pipeline.

mod async_generation;
mod biome_map;
mod compositor;
mod distance_field;
mod error;
mod frame;
mod generator;
mod heightmap;
mod island;
mod noise_field;
mod passes;
mod prng;
mod shore;
mod world_field;

pub mod debug_viz;

pub use async_generation::{AsyncTileGenerator, GeneratedTile, GenerationTask, TileKey};
pub use biome_map::{BiomeCenters, classify_regions, masks_from_regions};
pub use compositor::{apply_distance_weight, apply_water_cutoff, level_terrain, mix_in_place};
pub use distance_field::{DistanceField, compute_distance_field};
pub use error::TerrainError;
pub use frame::TileFrame;
pub use generator::{TileArtifacts, TileGenerator};
pub use heightmap::{OctaveMasking, generate_biome_height_field};
pub use island::{carve_river, make_island_mask};
pub use noise_field::{ValueField, ValueField2, sub_seed};
pub use passes::{
    GROUP_SIZE, PassDesc, PlanViolation, TILE_INPUTS, WORLD_OUTPUTS, is_group_aligned, tile_plan,
    validate_ordering, world_plan,
};
pub use prng::Prng;
pub use shore::generate_shore_mask;
pub use world_field::WorldField;
