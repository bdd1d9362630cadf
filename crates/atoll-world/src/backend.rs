//! The rendering backend seam.
//!
//! The pipeline hands each finished mesh to a backend as an opaque resource;
//! nothing in the core ever reads a mesh back. The headless implementation
//! records uploads so the driver and the tests can observe the contract
//! without a GPU.

use atoll_mesh::TileMesh;
use atoll_terrain::debug_viz::DebugImage;

/// Identifies one tile instance across its lifetime, including reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileInstanceId(pub u32);

/// Opaque handle to a mesh owned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Consumes generation output. Implemented by the renderer; the core only
/// ever pushes data through it.
pub trait RenderBackend {
    /// Take ownership of a tile's mesh, fully replacing any mesh previously
    /// uploaded for the same tile instance.
    fn upload_mesh(&mut self, tile: TileInstanceId, mesh: &TileMesh) -> MeshHandle;

    /// Present a debug visualization layer for a tile instance.
    fn upload_debug_image(&mut self, tile: TileInstanceId, image: &DebugImage);
}

/// Record of one mesh upload, kept by [`HeadlessBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadRecord {
    /// Which tile instance uploaded.
    pub tile: TileInstanceId,
    /// Vertex count of the uploaded mesh.
    pub vertices: usize,
    /// Triangle index count of the uploaded mesh.
    pub indices: usize,
}

/// Backend that swallows meshes and keeps upload statistics.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    uploads: Vec<UploadRecord>,
    debug_uploads: usize,
}

impl HeadlessBackend {
    /// A fresh backend with no recorded uploads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mesh upload seen, in order.
    pub fn uploads(&self) -> &[UploadRecord] {
        &self.uploads
    }

    /// Number of mesh uploads seen.
    pub fn upload_count(&self) -> usize {
        self.uploads.len()
    }

    /// Number of debug image uploads seen.
    pub fn debug_upload_count(&self) -> usize {
        self.debug_uploads
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload_mesh(&mut self, tile: TileInstanceId, mesh: &TileMesh) -> MeshHandle {
        self.uploads.push(UploadRecord {
            tile,
            vertices: mesh.vertices.len(),
            indices: mesh.indices.len(),
        });
        self.next_handle += 1;
        MeshHandle(self.next_handle)
    }

    fn upload_debug_image(&mut self, _tile: TileInstanceId, _image: &DebugImage) {
        self.debug_uploads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_backend_records_uploads() {
        let mut backend = HeadlessBackend::new();
        let mesh = TileMesh {
            vertices: Vec::new(),
            indices: Vec::new(),
        };
        let a = backend.upload_mesh(TileInstanceId(0), &mesh);
        let b = backend.upload_mesh(TileInstanceId(1), &mesh);
        assert_ne!(a, b, "each upload gets a fresh handle");
        assert_eq!(backend.upload_count(), 2);
        assert_eq!(backend.uploads()[1].tile, TileInstanceId(1));
    }

    #[test]
    fn test_headless_backend_counts_debug_uploads() {
        let mut backend = HeadlessBackend::new();
        backend.upload_debug_image(TileInstanceId(0), &DebugImage::new(4, 4));
        assert_eq!(backend.debug_upload_count(), 1);
    }
}
