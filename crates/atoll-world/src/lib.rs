//! World orchestration: explicit initialization and per-tick streaming over
//! the terrain generation pipeline.

mod backend;
mod tile;
mod world;

pub use backend::{HeadlessBackend, MeshHandle, RenderBackend, TileInstanceId};
pub use tile::TerrainTile;
pub use world::{World, WorldError};
