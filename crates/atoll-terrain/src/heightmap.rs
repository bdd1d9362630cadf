//! Multi-octave value-noise height field generation, one field per biome.
//!
//! Composites `octaves` layers of value noise per cell, with frequency
//! multiplied by `lacunarity` and amplitude by `persistence` per octave,
//! normalized by the total amplitude so the result spans `[0, max_height]`.

use atoll_config::{BiomeConfig, CurveLut};
use atoll_field::HeightField;

use crate::{DistanceField, TileFrame, ValueField};

/// Amplitude share below which an octave counts as minor for
/// [`OctaveMasking::MinorOctaves`].
const MINOR_OCTAVE_SHARE: f32 = 0.01;

/// How the cached distance field weights octave contributions during
/// accumulation.
#[derive(Clone, Copy)]
pub enum OctaveMasking<'a> {
    /// No distance weighting inside the octave loop. Whole-field weighting,
    /// if any, is applied by the compositor afterwards.
    Off,
    /// Weight only octaves contributing less than 1% of the total amplitude,
    /// suppressing fine detail near water without flattening the dominant
    /// octaves. Walking on fully-flattened terrain proved awkward.
    MinorOctaves {
        /// The cached world distance field.
        distance_field: &'a DistanceField,
        /// Falloff distance of the water influence.
        effect: f32,
    },
}

/// Generate one biome's height field for a tile frame.
///
/// Samples at `(cell / resolution) / zoom + offset`, so adjacent tiles line
/// up seamlessly. When `shaping` is supplied, the normalized height is
/// remapped through the biome's baked 100-sample curve before scaling to
/// `max_height`.
pub fn generate_biome_height_field(
    noise: &ValueField,
    biome: &BiomeConfig,
    frame: &TileFrame,
    max_height: f32,
    masking: OctaveMasking<'_>,
    shaping: Option<&CurveLut>,
) -> HeightField {
    let res = frame.resolution;
    let mut field = HeightField::new(res, 0.0);

    let total_amplitude = {
        let mut sum = 0.0_f32;
        let mut amp = 1.0_f32;
        for _ in 0..biome.octaves {
            sum += amp;
            amp *= biome.persistence;
        }
        sum.max(f32::EPSILON)
    };

    for y in 0..res {
        for x in 0..res {
            let uv = frame.uv(x, y);

            let mut total = 0.0_f32;
            let mut frequency = biome.scale;
            let mut amplitude = 1.0_f32;

            for _ in 0..biome.octaves {
                let n = noise.sample01(uv.x * frequency, uv.y * frequency);
                let contribution = match masking {
                    OctaveMasking::Off => n * amplitude,
                    OctaveMasking::MinorOctaves {
                        distance_field,
                        effect,
                    } => {
                        if amplitude / total_amplitude < MINOR_OCTAVE_SHARE {
                            n * amplitude * distance_field.weight_at(uv.x, uv.y, effect)
                        } else {
                            n * amplitude
                        }
                    }
                };
                total += contribution;

                frequency *= biome.lacunarity;
                amplitude *= biome.persistence;
            }

            let mut normalized = total / total_amplitude;
            if let Some(lut) = shaping {
                normalized = lut.sample(normalized);
            }
            field.set(x, y, normalized * max_height);
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_distance_field;
    use crate::noise_field::{HEIGHT_SALT, sub_seed};
    use atoll_config::Curve;
    use atoll_field::Mask;

    fn test_biome() -> BiomeConfig {
        BiomeConfig {
            scale: 5.0,
            octaves: 8,
            lacunarity: 2.0,
            persistence: 0.5,
            ..BiomeConfig::default()
        }
    }

    fn test_noise(seed: u64) -> ValueField {
        ValueField::new(sub_seed(seed, HEIGHT_SALT))
    }

    #[test]
    fn test_field_size_matches_resolution() {
        let field = generate_biome_height_field(
            &test_noise(0),
            &test_biome(),
            &TileFrame::full_map(64),
            20.0,
            OctaveMasking::Off,
            None,
        );
        assert_eq!(field.len(), 64 * 64);
    }

    #[test]
    fn test_heights_within_max_height() {
        let field = generate_biome_height_field(
            &test_noise(0),
            &test_biome(),
            &TileFrame::full_map(64),
            20.0,
            OctaveMasking::Off,
            None,
        );
        for &h in field.as_slice() {
            assert!(
                (0.0..=20.0).contains(&h),
                "height {h} escaped [0, max_height]"
            );
        }
    }

    #[test]
    fn test_same_inputs_same_field() {
        let frame = TileFrame::full_map(64);
        let a = generate_biome_height_field(
            &test_noise(42),
            &test_biome(),
            &frame,
            20.0,
            OctaveMasking::Off,
            None,
        );
        let b = generate_biome_height_field(
            &test_noise(42),
            &test_biome(),
            &frame,
            20.0,
            OctaveMasking::Off,
            None,
        );
        assert_eq!(a, b, "same seed + frame must reproduce the same field");
    }

    #[test]
    fn test_different_offsets_differ() {
        let biome = test_biome();
        let noise = test_noise(0);
        let a = generate_biome_height_field(
            &noise,
            &biome,
            &TileFrame::full_map(64),
            20.0,
            OctaveMasking::Off,
            None,
        );
        let shifted = TileFrame {
            offset: glam::Vec2::new(0.35, 0.61),
            ..TileFrame::full_map(64)
        };
        let b = generate_biome_height_field(
            &noise,
            &biome,
            &shifted,
            20.0,
            OctaveMasking::Off,
            None,
        );
        assert_ne!(a, b, "shifted frames should sample different terrain");
    }

    #[test]
    fn test_zoomed_tile_matches_full_map_samples() {
        // A half-map tile at offset 0.5 samples exactly the map positions a
        // full-map field at double resolution samples in its right half, so
        // adjacent tiles meet without seams.
        let biome = test_biome();
        let noise = test_noise(7);
        let full = TileFrame::full_map(128);
        let right_half = TileFrame {
            resolution: 64,
            offset: glam::Vec2::new(0.5, 0.0),
            zoom: 2.0,
        };
        let field_full =
            generate_biome_height_field(&noise, &biome, &full, 20.0, OctaveMasking::Off, None);
        let field_half = generate_biome_height_field(
            &noise,
            &biome,
            &right_half,
            20.0,
            OctaveMasking::Off,
            None,
        );

        for y in 0..64 {
            assert_eq!(
                *field_half.get(0, y),
                *field_full.get(64, y),
                "shared map position must produce the same height at row {y}"
            );
        }
    }

    #[test]
    fn test_shaping_curve_flattens_field() {
        let flat = Curve::linear(0.0, 0.25, 1.0, 0.25);
        let lut = flat.to_lut(100);
        let field = generate_biome_height_field(
            &test_noise(0),
            &test_biome(),
            &TileFrame::full_map(64),
            20.0,
            OctaveMasking::Off,
            Some(&lut),
        );
        for &h in field.as_slice() {
            assert!(
                (h - 5.0).abs() < 1e-3,
                "constant shaping curve should pin heights to 5.0, got {h}"
            );
        }
    }

    #[test]
    fn test_minor_octave_masking_preserves_dominant_height() {
        // Water everywhere: the distance weight is zero at every cell, so
        // minor octaves vanish but dominant octaves must survive.
        let df = compute_distance_field(&Mask::new(64, 0.0), 4);
        let frame = TileFrame::full_map(64);
        let biome = test_biome();
        let noise = test_noise(11);

        let masked = generate_biome_height_field(
            &noise,
            &biome,
            &frame,
            20.0,
            OctaveMasking::MinorOctaves {
                distance_field: &df,
                effect: 0.3,
            },
            None,
        );
        let unmasked = generate_biome_height_field(
            &noise,
            &biome,
            &frame,
            20.0,
            OctaveMasking::Off,
            None,
        );

        let sum_masked: f32 = masked.as_slice().iter().sum();
        let sum_unmasked: f32 = unmasked.as_slice().iter().sum();
        assert!(
            sum_masked > sum_unmasked * 0.9,
            "dominant octaves must not be flattened: masked {sum_masked} vs {sum_unmasked}"
        );
        assert!(
            sum_masked < sum_unmasked,
            "minor octaves should be suppressed over water"
        );
    }
}
