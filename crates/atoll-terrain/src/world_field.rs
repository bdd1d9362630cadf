//! Once-per-world generation state.
//!
//! Everything here is computed from the seed at initialization and read-only
//! afterwards: the cached water distance field, the biome center set, and the
//! seeded noise fields shared by every tile generation. Tiles only ever read
//! this state, so any number of generations may run concurrently against one
//! `WorldField`.

use std::sync::Arc;

use atoll_config::WorldConfig;
use tracing::{debug, info};

use crate::{
    BiomeCenters, DistanceField, Prng, TerrainError, ValueField, carve_river,
    compute_distance_field, make_island_mask,
    noise_field::{
        HEIGHT_SALT, ISLAND_SALT, RIVER_X_SALT, RIVER_Y_SALT, SAMPLER_X_SALT, SAMPLER_Y_SALT,
        ValueField2, sub_seed,
    },
    passes::{self, is_group_aligned},
};

/// Immutable per-world generation context.
#[derive(Debug)]
pub struct WorldField {
    seed: u64,
    distance_field: Arc<DistanceField>,
    centers: BiomeCenters,
    height_noise: ValueField,
    sampler_noise: ValueField2,
}

impl WorldField {
    /// Build the world context: island + river water mask, cached distance
    /// field, and biome centers.
    ///
    /// This is the only place the distance field is computed; it is never
    /// recomputed unless a new `WorldField` is initialized for a new seed.
    ///
    /// # Errors
    ///
    /// Rejects zero or group-misaligned resolutions before any generation
    /// runs.
    pub fn initialize(config: &WorldConfig) -> Result<Self, TerrainError> {
        validate_resolution("resolution", config.general.resolution)?;
        validate_resolution("island_resolution", config.island.island_resolution)?;

        let seed = config.general.seed;

        for pass in passes::world_plan() {
            debug!(pass = pass.name, "world pass planned");
        }

        let island_noise = ValueField::new(sub_seed(seed, ISLAND_SALT));
        let mut water_mask = make_island_mask(&config.island, &island_noise);

        let river_noise =
            ValueField2::new(sub_seed(seed, RIVER_X_SALT), sub_seed(seed, RIVER_Y_SALT));
        let mut prng = Prng::new(seed as f32);
        carve_river(&mut water_mask, &config.river, &mut prng, &river_noise);

        let distance_field =
            compute_distance_field(&water_mask, config.island.edt_iterations);
        let centers = BiomeCenters::generate(seed, &config.biome_grid);

        info!(
            seed,
            island_resolution = config.island.island_resolution,
            edt_iterations = config.island.edt_iterations,
            centers = centers.len(),
            "world field initialized; distance field cached"
        );

        Ok(Self {
            seed,
            distance_field: Arc::new(distance_field),
            centers,
            height_noise: ValueField::new(sub_seed(seed, HEIGHT_SALT)),
            sampler_noise: ValueField2::new(
                sub_seed(seed, SAMPLER_X_SALT),
                sub_seed(seed, SAMPLER_Y_SALT),
            ),
        })
    }

    /// The world seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The cached normalized water distance field.
    pub fn distance_field(&self) -> &DistanceField {
        &self.distance_field
    }

    /// The fixed biome center set.
    pub fn centers(&self) -> &BiomeCenters {
        &self.centers
    }

    /// The shared height-octave noise field.
    pub fn height_noise(&self) -> &ValueField {
        &self.height_noise
    }

    /// The biome edge offset noise.
    pub fn sampler_noise(&self) -> &ValueField2 {
        &self.sampler_noise
    }
}

fn validate_resolution(what: &'static str, value: usize) -> Result<(), TerrainError> {
    if value == 0 {
        return Err(TerrainError::ZeroResolution { what });
    }
    if !is_group_aligned(value) {
        return Err(TerrainError::ResolutionNotGroupAligned { what, got: value });
    }
    Ok(())
}
