//! Explicit world lifecycle: initialize once, tick from an external driver.

use std::sync::{Arc, Mutex};

use glam::Vec3;
use tracing::{debug, info};

use atoll_config::{BiomeConfig, WorldConfig};
use atoll_lod::{LodError, QuadTreeStreamer, UpdateStats};
use atoll_terrain::{TerrainError, TileGenerator, WorldField};

use crate::{
    backend::{RenderBackend, TileInstanceId},
    tile::TerrainTile,
};

/// Errors initializing a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The terrain configuration was invalid.
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    /// The streamer configuration was invalid.
    #[error(transparent)]
    Lod(#[from] LodError),
}

/// A streamed world: the cached generation context plus the LOD streamer.
///
/// There are no implicit lifecycle hooks: construct with [`World::initialize`]
/// and drive with [`World::tick`] from an external loop.
pub struct World<B> {
    generator: Arc<TileGenerator>,
    streamer: QuadTreeStreamer<TerrainTile<B>>,
    backend: Arc<Mutex<B>>,
    next_instance: u32,
    ticks: u64,
}

impl<B: RenderBackend> World<B> {
    /// Initialize a world: validate the configuration, build the cached
    /// world field (water mask, distance field, biome centers), and set up
    /// an empty streamer.
    ///
    /// All fatal configuration errors surface here; a world that exists can
    /// always tick.
    pub fn initialize(
        config: WorldConfig,
        biomes: Vec<BiomeConfig>,
        beach: BiomeConfig,
        backend: B,
    ) -> Result<Self, WorldError> {
        let streamer =
            QuadTreeStreamer::new(config.streamer.map_size, config.streamer.max_depth)?;
        let field = Arc::new(WorldField::initialize(&config)?);
        let biome_count = biomes.len();
        let generator = Arc::new(TileGenerator::new(config, biomes, beach, field)?);

        info!(biomes = biome_count, "world initialized");

        Ok(Self {
            generator,
            streamer,
            backend: Arc::new(Mutex::new(backend)),
            next_instance: 0,
            ticks: 0,
        })
    }

    /// One streaming tick toward `target`: walk the quadtree, then service
    /// the deferred spawn queue, instantiating tiles only when the pool runs
    /// dry.
    pub fn tick(&mut self, target: Vec3) -> UpdateStats {
        let generator = Arc::clone(&self.generator);
        let backend = Arc::clone(&self.backend);
        let next_instance = &mut self.next_instance;

        let stats = self.streamer.update(target, move || {
            let instance = TileInstanceId(*next_instance);
            *next_instance += 1;
            TerrainTile::new(instance, Arc::clone(&generator), Arc::clone(&backend))
        });

        self.ticks += 1;
        debug!(
            tick = self.ticks,
            active = self.streamer.active_tiles(),
            pooled = self.streamer.pooled_tiles(),
            "tick complete"
        );
        stats
    }

    /// The streamer (read-only), for inspection and stats.
    pub fn streamer(&self) -> &QuadTreeStreamer<TerrainTile<B>> {
        &self.streamer
    }

    /// The shared render backend.
    pub fn backend(&self) -> Arc<Mutex<B>> {
        Arc::clone(&self.backend)
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
