//! Renderers mapping generation buffers to debug images.

use atoll_field::{Grid2, HeightField, Mask};

use super::image::DebugImage;
use crate::DistanceField;

/// Render a height field as grayscale, black at 0 and white at `max_height`.
pub fn render_height_field(field: &HeightField, max_height: f32) -> DebugImage {
    let res = field.size() as u32;
    let mut image = DebugImage::new(res, res);
    let scale = if max_height > 0.0 { max_height } else { 1.0 };

    for y in 0..res {
        for x in 0..res {
            let v = (field.get(x as usize, y as usize) / scale).clamp(0.0, 1.0);
            let g = (v * 255.0) as u8;
            image.set_pixel(x, y, [g, g, g, 255]);
        }
    }
    image
}

/// Render a `[0, 1]` mask as grayscale.
pub fn render_mask(mask: &Mask) -> DebugImage {
    let res = mask.size() as u32;
    let mut image = DebugImage::new(res, res);
    for y in 0..res {
        for x in 0..res {
            let g = (mask.get(x as usize, y as usize).clamp(0.0, 1.0) * 255.0) as u8;
            image.set_pixel(x, y, [g, g, g, 255]);
        }
    }
    image
}

/// Render the binary land/water split recovered from the distance field:
/// water blue, land green.
pub fn render_water_mask(distance_field: &DistanceField) -> DebugImage {
    let mask = distance_field.as_mask();
    let res = mask.size() as u32;
    let mut image = DebugImage::new(res, res);
    for y in 0..res {
        for x in 0..res {
            let rgba = if *mask.get(x as usize, y as usize) <= f32::EPSILON {
                [30, 80, 200, 255]
            } else {
                [60, 160, 60, 255]
            };
            image.set_pixel(x, y, rgba);
        }
    }
    image
}

/// Render a UV gradient test pattern: red rises with u, green with v.
pub fn render_uv_gradient(resolution: usize) -> DebugImage {
    let res = resolution as u32;
    let mut image = DebugImage::new(res, res);
    for y in 0..res {
        for x in 0..res {
            let r = (x as f32 / res as f32 * 255.0) as u8;
            let g = (y as f32 / res as f32 * 255.0) as u8;
            image.set_pixel(x, y, [r, g, 0, 255]);
        }
    }
    image
}

/// A stable pseudo-random opaque color for a region index.
pub fn region_color(index: u32) -> [u8; 4] {
    let h = index.wrapping_mul(0x9E37_79B9).wrapping_add(0x7F4A_7C15);
    [
        (h >> 16) as u8 | 0x40,
        (h >> 8) as u8 | 0x40,
        h as u8 | 0x40,
        255,
    ]
}

/// Render a region-index grid with one hashed color per region.
pub fn render_regions(regions: &Grid2<u32>) -> DebugImage {
    let res = regions.size() as u32;
    let mut image = DebugImage::new(res, res);
    for y in 0..res {
        for x in 0..res {
            image.set_pixel(x, y, region_color(*regions.get(x as usize, y as usize)));
        }
    }
    image
}

/// Render the blended biome selection: each cell's biome indices mixed by
/// their mask weights, with the shore blended in as one more pseudo-biome,
/// then colored by the rounded result.
pub fn render_biome_blend(biome_masks: &[Mask], shore_mask: &Mask) -> DebugImage {
    let res = shore_mask.size() as u32;
    let mut image = DebugImage::new(res, res);
    let shore_index = biome_masks.len() as f32;

    for y in 0..res {
        for x in 0..res {
            let (xi, yi) = (x as usize, y as usize);
            let mut blended = 0.0_f32;
            for (i, mask) in biome_masks.iter().enumerate() {
                let w = *mask.get(xi, yi);
                blended = blended * (1.0 - w) + i as f32 * w;
            }
            let shore_w = *shore_mask.get(xi, yi);
            blended = blended * (1.0 - shore_w) + shore_index * shore_w;

            image.set_pixel(x, y, region_color(blended.round() as u32));
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_distance_field;

    #[test]
    fn test_height_field_render_dimensions_and_extremes() {
        let mut field = HeightField::new(64, 0.0);
        field.set(1, 0, 20.0);
        let image = render_height_field(&field, 20.0);
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(image.get_pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_water_mask_render_separates_land_and_water() {
        let mut water = Mask::new(64, 1.0);
        for y in 0..64 {
            water.set(0, y, 0.0);
        }
        let df = compute_distance_field(&water, 32);
        let image = render_water_mask(&df);
        assert_ne!(image.get_pixel(0, 0), image.get_pixel(63, 0));
    }

    #[test]
    fn test_uv_gradient_corners() {
        let image = render_uv_gradient(64);
        assert_eq!(image.get_pixel(0, 0), [0, 0, 0, 255]);
        let [r, g, _, _] = image.get_pixel(63, 63);
        assert!(r > 240 && g > 240);
    }

    #[test]
    fn test_region_colors_are_stable_and_distinct() {
        assert_eq!(region_color(5), region_color(5));
        let distinct = (0..8).any(|i| region_color(i) != region_color(i + 1));
        assert!(distinct, "neighboring region indices should differ in color");
    }

    #[test]
    fn test_regions_render_uses_one_color_per_region() {
        let mut regions = Grid2::new(16, 0_u32);
        for y in 0..16 {
            for x in 8..16 {
                regions.set(x, y, 1);
            }
        }
        let image = render_regions(&regions);
        assert_eq!(image.unique_color_count(), 2);
    }

    #[test]
    fn test_biome_blend_marks_shore() {
        let masks = vec![Mask::new(16, 1.0), Mask::new(16, 0.0)];
        let mut shore = Mask::new(16, 0.0);
        shore.set(3, 3, 1.0);
        let image = render_biome_blend(&masks, &shore);
        assert_ne!(
            image.get_pixel(3, 3),
            image.get_pixel(10, 10),
            "a full-shore cell should be colored as the shore pseudo-biome"
        );
    }
}
