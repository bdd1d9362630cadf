//! Asynchronous tile generation with a configurable thread pool.
//!
//! The streamer itself is single-threaded, but the buffer-scoping invariant
//! makes generation safe to offload: every call gets private buffers and
//! only reads the shared world field. Workers receive tasks over a bounded
//! channel, honor per-task cancellation, and deliver finished height fields
//! back over a second bounded channel for the main thread to drain.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use dashmap::DashMap;
use glam::Vec3;

use crate::{TileArtifacts, TileFrame, TileGenerator};

/// Identifies one streamed tile placement for cancellation and dedup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Tile center x in world units.
    pub x: i64,
    /// Tile center z in world units.
    pub z: i64,
    /// Tile side length in world units.
    pub size: u32,
}

impl TileKey {
    /// Key for a tile of `size` world units centered at `position`.
    pub fn new(size: u32, position: Vec3) -> Self {
        Self {
            x: position.x as i64,
            z: position.z as i64,
            size,
        }
    }
}

/// A request to generate a single tile.
#[derive(Clone, Debug)]
pub struct GenerationTask {
    /// The tile placement this task regenerates.
    pub key: TileKey,
    /// The sampling frame for the placement.
    pub frame: TileFrame,
    /// Priority: lower values are generated first. Typically the squared
    /// distance from the tile to the target, so nearby tiles come back first.
    pub priority: u64,
}

/// A fully generated tile ready for mesh extraction.
pub struct GeneratedTile {
    /// The key matching the original task.
    pub key: TileKey,
    /// The generation artifacts (height field, debug image, pass record).
    pub artifacts: TileArtifacts,
    /// Generation time in microseconds (for profiling).
    pub generation_time_us: u64,
}

/// Internal wrapper that carries the task and its cancellation flag.
struct PrioritizedTask {
    task: GenerationTask,
    cancelled: Arc<AtomicBool>,
}

/// Manages asynchronous tile generation across a thread pool.
pub struct AsyncTileGenerator {
    task_sender: Sender<PrioritizedTask>,
    result_receiver: Receiver<GeneratedTile>,
    /// Shared cancellation flag per task (keyed by [`TileKey`]).
    active_tasks: Arc<DashMap<TileKey, Arc<AtomicBool>>>,
    /// Current number of in-flight tasks.
    in_flight: Arc<AtomicU64>,
}

impl AsyncTileGenerator {
    /// Create an async generator with the specified thread count and queue
    /// capacities. Each worker owns a clone of the tile generator; the world
    /// field behind it is shared read-only.
    pub fn new(
        generator: TileGenerator,
        thread_count: usize,
        max_concurrent: usize,
        result_capacity: usize,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<PrioritizedTask>(max_concurrent * 2);
        let (result_sender, result_receiver) = bounded::<GeneratedTile>(result_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let generator = generator.clone();

            std::thread::Builder::new()
                .name("tile-gen-worker".into())
                .spawn(move || {
                    while let Ok(ptask) = receiver.recv() {
                        if ptask.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let start = std::time::Instant::now();
                        let artifacts = generator.generate(ptask.task.frame);
                        let elapsed = start.elapsed().as_micros() as u64;

                        if !ptask.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(GeneratedTile {
                                key: ptask.task.key,
                                artifacts,
                                generation_time_us: elapsed,
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("Failed to spawn tile generation worker thread");
        }

        Self {
            task_sender,
            result_receiver,
            active_tasks: Arc::new(DashMap::new()),
            in_flight,
        }
    }

    /// Create a generator with a sensible default thread count based on CPU
    /// cores, leaving headroom for the streaming thread.
    pub fn with_defaults(generator: TileGenerator) -> Self {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 1).max(1);
        Self::new(generator, threads, 64, 128)
    }

    /// Submit a tile for background generation.
    ///
    /// Returns `Ok(())` if the task was queued, or `Err(task)` if the queue
    /// is full.
    #[allow(clippy::result_large_err)]
    pub fn submit(&self, task: GenerationTask) -> Result<(), GenerationTask> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_tasks.insert(task.key, Arc::clone(&cancelled));
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        let ptask = PrioritizedTask {
            task: task.clone(),
            cancelled,
        };
        self.task_sender.try_send(ptask).map_err(|e| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            let key = e.into_inner().task.key;
            self.active_tasks.remove(&key);
            task
        })
    }

    /// Cancel a pending or in-progress generation task.
    ///
    /// If the task has already completed, this is a no-op.
    pub fn cancel(&self, key: &TileKey) {
        if let Some((_, cancelled)) = self.active_tasks.remove(key) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Drain all completed tiles from the result channel.
    ///
    /// Call this once per tick on the streaming thread.
    pub fn drain_results(&self) -> Vec<GeneratedTile> {
        let mut results = Vec::new();
        while let Ok(tile) = self.result_receiver.try_recv() {
            self.active_tasks.remove(&tile.key);
            results.push(tile);
        }
        results
    }

    /// Number of tasks currently in flight (queued or executing).
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` if a task for the given key is currently pending.
    pub fn is_pending(&self, key: &TileKey) -> bool {
        self.active_tasks.contains_key(key)
    }
}
