//! Quadtree level-of-detail streaming: arena quadtree, tile pool, and the
//! per-tick update walk with deferred spawning.

mod pool;
mod quadtree;
mod streamer;

pub use pool::{TileId, TilePool, TileStore};
pub use quadtree::{NodeId, QuadTree};
pub use streamer::{LodError, QuadTreeStreamer, Tile, UpdateStats};
