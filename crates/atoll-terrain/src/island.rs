//! Island and river water mask construction.
//!
//! The water mask is a single island-resolution grid where 1.0 is land and
//! 0.0 is water. The island stage lays down a noisy radial landmass; the
//! river stage carves a corridor of water back out of it. Both run once per
//! world — the mask only feeds the cached distance field.

use glam::Vec2;

use atoll_config::{IslandConfig, RiverConfig};
use atoll_field::Mask;

use crate::{noise_field::ValueField2, Prng, ValueField};

/// Base island radius in map-normalized units; r = 1 at the mid-edge of the map.
const BASE_RADIUS: f32 = 0.8;

/// Build the radial island mask at `config.island_resolution`.
///
/// A cell at normalized radius `r` from the map center is land when
/// `r < BASE_RADIUS * (roundness + (1 - roundness) * noise01)`: roundness 1
/// yields a pure circular cutoff, roundness 0 a fully noise-driven boundary.
pub fn make_island_mask(config: &IslandConfig, boundary_noise: &ValueField) -> Mask {
    let res = config.island_resolution;
    let mut mask = Mask::new(res, 0.0);

    for y in 0..res {
        for x in 0..res {
            let px = (x as f32 + 0.5) / res as f32;
            let py = (y as f32 + 0.5) / res as f32;
            // r = 1 at the middle of a map edge.
            let r = Vec2::new(px - 0.5, py - 0.5).length() * 2.0;

            let n = boundary_noise.sample01(
                px * config.island_noise_scale,
                py * config.island_noise_scale,
            );
            let threshold =
                BASE_RADIUS * (config.island_roundness + (1.0 - config.island_roundness) * n);

            if r < threshold {
                mask.set(x, y, 1.0);
            }
        }
    }

    mask
}

/// Carve a river corridor into the water mask.
///
/// The path runs start → center → end: the center is the map middle jittered
/// by `river_center_jitter`, the start sits on the left edge, and a coin flip
/// sends the end to the bottom or right edge. Cells whose noise-perturbed
/// position lies within `river_width` of the path become water.
///
/// All random draws come from `prng` in a fixed order, so the layout is a
/// pure function of the world seed.
pub fn carve_river(
    mask: &mut Mask,
    config: &RiverConfig,
    prng: &mut Prng,
    path_noise: &ValueField2,
) {
    let jitter = config.river_center_jitter;
    let center = Vec2::new(
        0.5 + prng.range(-jitter, jitter),
        0.5 + prng.range(-jitter, jitter),
    );

    let end_on_bottom = prng.next() > 0.5;
    let frac_end = prng.range(0.25, 0.75);
    let frac_start = prng.range(0.25, 0.75);

    let start = Vec2::new(0.0, frac_start);
    let end = if end_on_bottom {
        Vec2::new(frac_end, 0.0)
    } else {
        Vec2::new(1.0, frac_end)
    };

    let res = mask.size();
    for y in 0..res {
        for x in 0..res {
            let p = Vec2::new((x as f32 + 0.5) / res as f32, (y as f32 + 0.5) / res as f32);
            let p = p + path_noise.offset(p, config.river_noise_scale, config.river_noise_amount);

            let d = distance_to_segment(p, start, center)
                .min(distance_to_segment(p, center, end));
            if d < config.river_width {
                mask.set(x, y, 0.0);
            }
        }
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::{ISLAND_SALT, RIVER_X_SALT, RIVER_Y_SALT, sub_seed};

    fn small_island_config() -> IslandConfig {
        IslandConfig {
            island_resolution: 64,
            ..IslandConfig::default()
        }
    }

    #[test]
    fn test_island_mask_is_binary() {
        let config = small_island_config();
        let noise = ValueField::new(sub_seed(0, ISLAND_SALT));
        let mask = make_island_mask(&config, &noise);
        for &cell in mask.as_slice() {
            assert!(cell == 0.0 || cell == 1.0, "mask cell {cell} is not binary");
        }
    }

    #[test]
    fn test_island_center_is_land_and_corners_are_water() {
        let config = small_island_config();
        let noise = ValueField::new(sub_seed(0, ISLAND_SALT));
        let mask = make_island_mask(&config, &noise);
        let mid = mask.size() / 2;
        assert_eq!(*mask.get(mid, mid), 1.0, "map center should be land");
        assert_eq!(*mask.get(0, 0), 0.0, "map corner should be water");
        let last = mask.size() - 1;
        assert_eq!(*mask.get(last, last), 0.0, "map corner should be water");
    }

    #[test]
    fn test_full_roundness_yields_circle() {
        let config = IslandConfig {
            island_roundness: 1.0,
            ..small_island_config()
        };
        let noise = ValueField::new(sub_seed(0, ISLAND_SALT));
        let mask = make_island_mask(&config, &noise);
        let res = mask.size();
        for y in 0..res {
            for x in 0..res {
                let px = (x as f32 + 0.5) / res as f32;
                let py = (y as f32 + 0.5) / res as f32;
                let r = Vec2::new(px - 0.5, py - 0.5).length() * 2.0;
                let expected = if r < BASE_RADIUS { 1.0 } else { 0.0 };
                assert_eq!(
                    *mask.get(x, y),
                    expected,
                    "roundness 1 must ignore noise at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_river_removes_land() {
        let config = small_island_config();
        let noise = ValueField::new(sub_seed(3, ISLAND_SALT));
        let mut mask = make_island_mask(&config, &noise);
        let land_before: f32 = mask.as_slice().iter().sum();

        let river = RiverConfig {
            river_width: 0.05,
            ..RiverConfig::default()
        };
        let path_noise = ValueField2::new(sub_seed(3, RIVER_X_SALT), sub_seed(3, RIVER_Y_SALT));
        let mut prng = Prng::new(3.0);
        carve_river(&mut mask, &river, &mut prng, &path_noise);

        let land_after: f32 = mask.as_slice().iter().sum();
        assert!(
            land_after < land_before,
            "a river through the island must carve away land: {land_before} -> {land_after}"
        );
    }

    #[test]
    fn test_river_is_deterministic() {
        let config = small_island_config();
        let river = RiverConfig::default();
        let noise = ValueField::new(sub_seed(5, ISLAND_SALT));
        let path_noise = ValueField2::new(sub_seed(5, RIVER_X_SALT), sub_seed(5, RIVER_Y_SALT));

        let mut mask_a = make_island_mask(&config, &noise);
        let mut prng_a = Prng::new(5.0);
        carve_river(&mut mask_a, &river, &mut prng_a, &path_noise);

        let mut mask_b = make_island_mask(&config, &noise);
        let mut prng_b = Prng::new(5.0);
        carve_river(&mut mask_b, &river, &mut prng_b, &path_noise);

        assert_eq!(mask_a, mask_b, "same seed must carve the same river");
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert!((distance_to_segment(Vec2::new(0.5, 0.5), a, b) - 0.5).abs() < 1e-6);
        assert!((distance_to_segment(Vec2::new(-1.0, 0.0), a, b) - 1.0).abs() < 1e-6);
        assert!((distance_to_segment(Vec2::new(2.0, 0.0), a, b) - 1.0).abs() < 1e-6);
        // Degenerate segment falls back to point distance.
        assert!((distance_to_segment(Vec2::new(0.0, 1.0), a, a) - 1.0).abs() < 1e-6);
    }
}
