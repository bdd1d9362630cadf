//! Height field compositing: mask-weighted blending, water cutoff, leveling.

use atoll_field::{HeightField, Mask};

use crate::{DistanceField, TileFrame};

/// Blend `other` into `acc` cell-wise using `mask` as the interpolation
/// weight: `acc = acc * (1 - mask) + other * mask`.
///
/// # Panics
///
/// Panics in debug builds if the three grids disagree on size; mixing
/// different resolutions is a pipeline ordering bug.
pub fn mix_in_place(acc: &mut HeightField, other: &HeightField, mask: &Mask) {
    debug_assert_eq!(acc.size(), other.size());
    debug_assert_eq!(acc.size(), mask.size());

    let acc_cells = acc.as_mut_slice();
    let other_cells = other.as_slice();
    let mask_cells = mask.as_slice();
    for i in 0..acc_cells.len() {
        let w = mask_cells[i];
        acc_cells[i] = acc_cells[i] * (1.0 - w) + other_cells[i] * w;
    }
}

/// Multiply every cell by the distance-falloff weight, pulling terrain down
/// toward the waterline over the `effect` distance.
pub fn apply_distance_weight(
    height: &mut HeightField,
    distance_field: &DistanceField,
    frame: &TileFrame,
    effect: f32,
) {
    let res = frame.resolution;
    for y in 0..res {
        for x in 0..res {
            let uv = frame.uv(x, y);
            let weighted = *height.get(x, y) * distance_field.weight_at(uv.x, uv.y, effect);
            height.set(x, y, weighted);
        }
    }
}

/// Apply the water mask as a binary cutoff: cells over water drop to zero
/// height so no geometry exists beyond the mask boundary.
pub fn apply_water_cutoff(
    height: &mut HeightField,
    distance_field: &DistanceField,
    frame: &TileFrame,
) {
    let res = frame.resolution;
    for y in 0..res {
        for x in 0..res {
            let uv = frame.uv(x, y);
            if distance_field.is_water(uv.x, uv.y) {
                height.set(x, y, 0.0);
            }
        }
    }
}

/// Quantize heights into discrete terraces of `level_height`.
pub fn level_terrain(height: &mut HeightField, level_height: f32) {
    if level_height <= 0.0 {
        return;
    }
    for cell in height.as_mut_slice() {
        *cell = (*cell / level_height).floor() * level_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_distance_field;

    #[test]
    fn test_mix_zero_mask_keeps_accumulator() {
        let mut acc = HeightField::new(8, 2.0);
        let other = HeightField::new(8, 9.0);
        let mask = Mask::new(8, 0.0);
        mix_in_place(&mut acc, &other, &mask);
        assert!(acc.as_slice().iter().all(|&h| h == 2.0));
    }

    #[test]
    fn test_mix_full_mask_replaces_accumulator() {
        let mut acc = HeightField::new(8, 2.0);
        let other = HeightField::new(8, 9.0);
        let mask = Mask::new(8, 1.0);
        mix_in_place(&mut acc, &other, &mask);
        assert!(acc.as_slice().iter().all(|&h| h == 9.0));
    }

    #[test]
    fn test_mix_half_mask_averages() {
        let mut acc = HeightField::new(8, 2.0);
        let other = HeightField::new(8, 4.0);
        let mask = Mask::new(8, 0.5);
        mix_in_place(&mut acc, &other, &mask);
        for &h in acc.as_slice() {
            assert!((h - 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_water_cutoff_zeroes_water_cells_only() {
        // Left half water, right half land.
        let mut water = Mask::new(64, 1.0);
        for y in 0..64 {
            for x in 0..32 {
                water.set(x, y, 0.0);
            }
        }
        let df = compute_distance_field(&water, 64);

        let frame = TileFrame::full_map(64);
        let mut height = HeightField::new(64, 5.0);
        apply_water_cutoff(&mut height, &df, &frame);

        assert_eq!(*height.get(4, 32), 0.0, "water cell should be cut to zero");
        assert!(
            *height.get(60, 32) > 0.0,
            "inland cell should keep its height"
        );
    }

    #[test]
    fn test_distance_weight_rises_inland() {
        let mut water = Mask::new(64, 1.0);
        for y in 0..64 {
            water.set(0, y, 0.0);
        }
        let df = compute_distance_field(&water, 64);

        let frame = TileFrame::full_map(64);
        let mut height = HeightField::new(64, 10.0);
        apply_distance_weight(&mut height, &df, &frame, 0.3);

        assert_eq!(*height.get(0, 32), 0.0, "waterline height should vanish");
        assert_eq!(
            *height.get(63, 32),
            10.0,
            "far-inland height should be untouched"
        );
        let near = *height.get(4, 32);
        assert!(
            near > 0.0 && near < 10.0,
            "coastal height should be partially pulled down, got {near}"
        );
    }

    #[test]
    fn test_leveling_quantizes_to_steps() {
        let mut height = HeightField::from_cells(2, vec![0.4, 1.7, 2.0, 3.9]).unwrap();
        level_terrain(&mut height, 1.0);
        assert_eq!(height.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_leveling_ignores_non_positive_step() {
        let mut height = HeightField::from_cells(2, vec![0.4, 1.7, 2.0, 3.9]).unwrap();
        let original = height.clone();
        level_terrain(&mut height, 0.0);
        assert_eq!(height, original);
    }
}
