//! The terrain tile: the unit of streamed work.

use std::sync::{Arc, Mutex};

use glam::Vec3;

use atoll_lod::Tile;
use atoll_mesh::build_tile_mesh;
use atoll_terrain::{TileFrame, TileGenerator};

use crate::backend::{MeshHandle, RenderBackend, TileInstanceId};

/// A streamed terrain tile.
///
/// Implements the streamer's tile contract: `update` recomputes the sampling
/// frame from (size, position, map size), runs the full generation pipeline,
/// extracts the mesh, and hands it to the render backend, fully replacing
/// whatever the tile showed before. Tiles are recycled through the pool and
/// regenerated rather than destroyed.
pub struct TerrainTile<B> {
    instance: TileInstanceId,
    generator: Arc<TileGenerator>,
    backend: Arc<Mutex<B>>,
    active: bool,
    mesh: Option<MeshHandle>,
    last_passes: Vec<&'static str>,
}

impl<B: RenderBackend> TerrainTile<B> {
    /// Create an inactive tile bound to a generator and backend.
    pub fn new(
        instance: TileInstanceId,
        generator: Arc<TileGenerator>,
        backend: Arc<Mutex<B>>,
    ) -> Self {
        Self {
            instance,
            generator,
            backend,
            active: false,
            mesh: None,
            last_passes: Vec::new(),
        }
    }

    /// This tile's instance id.
    pub fn instance(&self) -> TileInstanceId {
        self.instance
    }

    /// Whether the tile is currently active in a leaf node.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The backend handle of the most recently uploaded mesh.
    pub fn mesh_handle(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// The passes executed by the most recent `update`, in order.
    pub fn last_passes(&self) -> &[&'static str] {
        &self.last_passes
    }
}

impl<B: RenderBackend> Tile for TerrainTile<B> {
    fn update(&mut self, size: u32, position: Vec3, map_size: u32) {
        let frame = TileFrame::from_tile(size, position, map_size);
        let mut artifacts = self.generator.generate(frame);

        let mut backend = self.backend.lock().expect("render backend poisoned");
        if let Some(image) = &artifacts.debug_image {
            backend.upload_debug_image(self.instance, image);
        }
        if !self.generator.config().debug.layer_only {
            let mesh = build_tile_mesh(&artifacts.height, size as f32);
            artifacts.passes.push("GenerateMesh");
            self.mesh = Some(backend.upload_mesh(self.instance, &mesh));
        }
        self.last_passes = artifacts.passes;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
