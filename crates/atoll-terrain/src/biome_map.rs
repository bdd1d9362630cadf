//! Biome classification over a jittered pseudo-Voronoi grid.
//!
//! A fixed set of biome center points is laid out once per world on a
//! regular grid, jittered by a seeded RNG. Each tile cell is assigned the
//! biome of its nearest center, with high-frequency offset noise on the
//! query position to break up the straight Voronoi edges; the per-cell
//! region index is then split into one binary mask per biome for blending.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use atoll_config::BiomeGridConfig;
use atoll_field::{Grid2, Mask};

use crate::{
    TileFrame,
    noise_field::{CENTER_SALT, ValueField2, sub_seed},
};

/// The fixed biome center point set, computed once at world initialization.
#[derive(Clone, Debug)]
pub struct BiomeCenters {
    points: Vec<Vec2>,
}

impl BiomeCenters {
    /// Lay out `floor(1 / biome_center_radius)^2` centers on a jittered grid.
    ///
    /// Jitter is drawn from a ChaCha stream seeded from the world seed, so
    /// the layout is deterministic across platforms and thread counts.
    pub fn generate(world_seed: u64, config: &BiomeGridConfig) -> Self {
        let per_side = (1.0 / config.biome_center_radius).floor().max(1.0) as usize;
        let jitter = config.biome_center_radius * config.biome_grid_distortion;

        let mut rng = ChaCha8Rng::seed_from_u64(sub_seed(world_seed, CENTER_SALT) as u64);
        let mut points = Vec::with_capacity(per_side * per_side);
        for j in 0..per_side {
            for i in 0..per_side {
                let base = Vec2::new(
                    (i as f32 + 0.5) / per_side as f32,
                    (j as f32 + 0.5) / per_side as f32,
                );
                let wiggle = Vec2::new(
                    rng.random_range(-1.0_f32..1.0) * jitter,
                    rng.random_range(-1.0_f32..1.0) * jitter,
                );
                points.push(base + wiggle);
            }
        }

        Self { points }
    }

    /// The center points in map-normalized coordinates.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of centers.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no centers were generated.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the center nearest to `p`, ties resolved by lowest index.
    ///
    /// Returns `None` only for an empty center set; callers treat that as
    /// biome 0 rather than failing.
    pub fn closest(&self, p: Vec2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, center) in self.points.iter().enumerate() {
            let d = (p - *center).length_squared();
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((idx, d));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

/// Assign every cell of the frame a biome index in `0..biome_count`.
///
/// The query position is perturbed by the sampler noise before the
/// nearest-center scan; center indices wrap onto biomes with a modulo so any
/// center count exercises every biome.
pub fn classify_regions(
    centers: &BiomeCenters,
    config: &BiomeGridConfig,
    edge_noise: &ValueField2,
    frame: &TileFrame,
    biome_count: usize,
) -> Grid2<u32> {
    let res = frame.resolution;
    let mut regions = Grid2::new(res, 0_u32);
    if biome_count == 0 {
        return regions;
    }

    for y in 0..res {
        for x in 0..res {
            let uv = frame.uv(x, y);
            let p = uv + edge_noise.offset(uv, config.sampler_noise_freq, config.sampler_noise_factor);
            let biome = match centers.closest(p) {
                Some(idx) => (idx % biome_count) as u32,
                None => 0,
            };
            regions.set(x, y, biome);
        }
    }

    regions
}

/// Split a region-index grid into one binary mask per biome.
pub fn masks_from_regions(regions: &Grid2<u32>, biome_count: usize) -> Vec<Mask> {
    let res = regions.size();
    let mut masks = vec![Mask::new(res, 0.0); biome_count];
    for y in 0..res {
        for x in 0..res {
            let biome = *regions.get(x, y) as usize;
            if biome < biome_count {
                masks[biome].set(x, y, 1.0);
            }
        }
    }
    masks
}
