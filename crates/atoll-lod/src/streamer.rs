//! The per-tick streaming walk.
//!
//! `update` walks the quadtree once toward the target: nodes inside the
//! influence range subdivide (releasing their own tile), nodes outside
//! collapse their subtree (releasing every descendant tile), and leaves that
//! need a tile are queued rather than spawned inline. A single deferred pass
//! then services the queue, so tiles freed by collapses earlier in the walk
//! are available for reuse by spawns later in the same walk.

use glam::Vec3;
use tracing::{debug, trace};

use crate::{
    pool::{TileId, TilePool, TileStore},
    quadtree::{NodeId, QuadTree},
};

/// The tile contract consumed by the streamer.
///
/// `update` must be idempotent for identical arguments and must fully
/// replace any previously assigned state on the tile.
pub trait Tile {
    /// Regenerate the tile to represent a square region of `size` world
    /// units centered at `position`, inside a map of `map_size` world units.
    fn update(&mut self, size: u32, position: Vec3, map_size: u32);

    /// Activate or deactivate the tile. Pooled tiles are inactive.
    fn set_active(&mut self, active: bool);
}

/// Streamer configuration errors, caught at construction.
#[derive(Debug, thiserror::Error)]
pub enum LodError {
    /// The map has no extent.
    #[error("map size must be positive")]
    ZeroMapSize,

    /// Subdivision would produce tiles of zero size.
    #[error("max depth {max_depth} collapses {map_size}-unit tiles to zero size")]
    TileSizeUnderflow {
        /// Configured map size.
        map_size: u32,
        /// Configured maximum depth.
        max_depth: u8,
    },
}

/// Work performed by one `update` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Nodes that subdivided this tick.
    pub subdivided: usize,
    /// Branches that collapsed this tick.
    pub collapsed: usize,
    /// Spawns served from the pool.
    pub reused: usize,
    /// Spawns that had to instantiate a new tile.
    pub spawned_new: usize,
}

/// Quadtree LOD streamer owning the tree, the tile store, and the pool.
pub struct QuadTreeStreamer<T> {
    tree: QuadTree,
    store: TileStore<T>,
    pool: TilePool,
    spawn_queue: Vec<NodeId>,
    map_size: u32,
}

impl<T: Tile> QuadTreeStreamer<T> {
    /// Create a streamer for a map of `map_size` world units centered on the
    /// origin, subdividing at most `max_depth` times.
    ///
    /// # Errors
    ///
    /// Rejects a zero map size, and a depth that would underflow the minimum
    /// tile size (`map_size / 2^max_depth == 0`).
    pub fn new(map_size: u32, max_depth: u8) -> Result<Self, LodError> {
        if map_size == 0 {
            return Err(LodError::ZeroMapSize);
        }
        if map_size >> max_depth == 0 {
            return Err(LodError::TileSizeUnderflow {
                map_size,
                max_depth,
            });
        }

        Ok(Self {
            tree: QuadTree::new(Vec3::ZERO, map_size, max_depth),
            store: TileStore::new(),
            pool: TilePool::new(),
            spawn_queue: Vec::new(),
            map_size,
        })
    }

    /// One streaming tick: walk the tree toward `target`, then service the
    /// spawn queue. `make_tile` instantiates a tile only when the pool is
    /// empty.
    ///
    /// The walk is a single non-preemptible pass; the queue is always
    /// drained before returning.
    pub fn update(&mut self, target: Vec3, mut make_tile: impl FnMut() -> T) -> UpdateStats {
        let mut stats = UpdateStats::default();

        self.walk(self.tree.root(), target, &mut stats);

        // Deferred spawn pass: collapses above have already refilled the pool.
        let queue = std::mem::take(&mut self.spawn_queue);
        for node in queue {
            let tile_id = match self.pool.acquire() {
                Some(id) => {
                    stats.reused += 1;
                    id
                }
                None => {
                    stats.spawned_new += 1;
                    self.store.insert(make_tile())
                }
            };

            let (size, position) = (self.tree.size(node), self.tree.position(node));
            let tile = self.store.get_mut(tile_id);
            tile.set_active(true);
            tile.update(size, position, self.map_size);
            self.tree.node_mut(node).tile = Some(tile_id);
            trace!(?position, size, "tile spawned");
        }

        if stats != UpdateStats::default() {
            debug!(
                subdivided = stats.subdivided,
                collapsed = stats.collapsed,
                reused = stats.reused,
                spawned_new = stats.spawned_new,
                "streamer tick"
            );
        }
        stats
    }

    fn walk(&mut self, id: NodeId, target: Vec3, stats: &mut UpdateStats) {
        if self.tree.node(id).contains(target) {
            if self.tree.children(id).is_none() && self.tree.depth(id) > 0 {
                // A subdivided node never holds a tile itself.
                self.tree.subdivide(id);
                stats.subdivided += 1;
                if let Some(tile) = self.tree.node_mut(id).tile.take() {
                    self.deactivate(tile);
                }
            } else if self.tree.depth(id) == 0 && self.tree.tile(id).is_none() {
                self.spawn_queue.push(id);
            }

            if let Some(children) = self.tree.children(id) {
                for child in children {
                    self.walk(child, target, stats);
                }
            }
        } else {
            if self.tree.children(id).is_some() {
                let mut released = Vec::new();
                self.tree.collapse(id, &mut released);
                stats.collapsed += 1;
                for tile in released {
                    self.deactivate(tile);
                }
            }
            if self.tree.tile(id).is_none() {
                self.spawn_queue.push(id);
            }
        }
    }

    fn deactivate(&mut self, tile: TileId) {
        self.store.get_mut(tile).set_active(false);
        self.pool.release(tile);
    }

    /// Number of leaves currently holding a tile.
    pub fn active_tiles(&self) -> usize {
        self.tree
            .leaves()
            .iter()
            .filter(|&&leaf| self.tree.tile(leaf).is_some())
            .count()
    }

    /// Number of tiles waiting in the pool.
    pub fn pooled_tiles(&self) -> usize {
        self.pool.len()
    }

    /// Total tiles ever instantiated.
    pub fn total_tiles(&self) -> usize {
        self.store.len()
    }

    /// The footprint `(center, size)` of every active leaf.
    pub fn active_footprints(&self) -> Vec<(Vec3, u32)> {
        self.tree
            .leaves()
            .iter()
            .filter(|&&leaf| self.tree.tile(leaf).is_some())
            .map(|&leaf| (self.tree.position(leaf), self.tree.size(leaf)))
            .collect()
    }

    /// The underlying quadtree (read-only).
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Iterate over every tile ever created.
    pub fn tiles(&self) -> impl Iterator<Item = &T> {
        self.store.iter()
    }
}
