//! The per-tile generation pipeline.
//!
//! Executes the tile pass plan in order: biome classification, per-biome
//! height fields, shore masking, compositing, and the optional debug layer.
//! Every buffer is created and consumed within one `generate` call; the only
//! shared input is the read-only [`WorldField`].

use std::sync::Arc;

use atoll_config::{BiomeConfig, CurveLut, DebugLayer, WorldConfig};
use atoll_field::HeightField;
use hashbrown::HashSet;
use tracing::debug;

use crate::{
    OctaveMasking, TerrainError, TileFrame, apply_distance_weight, apply_water_cutoff,
    classify_regions, debug_viz, generate_biome_height_field, generate_shore_mask, level_terrain,
    masks_from_regions, mix_in_place, world_field::WorldField,
};

/// Everything one generation call produces.
pub struct TileArtifacts {
    /// The composited height field at tile resolution.
    pub height: HeightField,
    /// The rendered debug layer, when one is selected.
    pub debug_image: Option<debug_viz::DebugImage>,
    /// Names of the passes executed, in order. The mesh pass is appended by
    /// the tile once extraction runs.
    pub passes: Vec<&'static str>,
}

/// Generates tiles for one world.
///
/// Holds the world configuration, the biome list (read-only after
/// construction), baked shaping curves, and a shared reference to the world
/// field. Cloning is cheap enough for handing one generator to each worker
/// thread.
#[derive(Clone)]
pub struct TileGenerator {
    config: WorldConfig,
    biomes: Vec<BiomeConfig>,
    beach: BiomeConfig,
    biome_luts: Vec<CurveLut>,
    beach_lut: CurveLut,
    shore_lut: CurveLut,
    field: Arc<WorldField>,
}

impl TileGenerator {
    /// Create a generator over an initialized world field.
    ///
    /// # Errors
    ///
    /// Rejects an empty biome list and duplicate biome names up front; a
    /// generator that exists can always generate.
    pub fn new(
        config: WorldConfig,
        biomes: Vec<BiomeConfig>,
        beach: BiomeConfig,
        field: Arc<WorldField>,
    ) -> Result<Self, TerrainError> {
        if biomes.is_empty() {
            return Err(TerrainError::EmptyBiomeList);
        }
        let mut names = HashSet::new();
        for biome in &biomes {
            if !names.insert(biome.name.as_str()) {
                return Err(TerrainError::DuplicateBiomeName(biome.name.clone()));
            }
        }
        drop(names);

        let lut_len = atoll_config::LUT_SAMPLES;
        let biome_luts = biomes.iter().map(|b| b.height_curve.to_lut(lut_len)).collect();
        let beach_lut = beach.height_curve.to_lut(lut_len);
        let shore_lut = config.island.shore_curve.to_lut(lut_len);

        Ok(Self {
            config,
            biomes,
            beach,
            biome_luts,
            beach_lut,
            shore_lut,
            field,
        })
    }

    /// The world configuration this generator was built with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Number of biomes (excluding the beach biome).
    pub fn biome_count(&self) -> usize {
        self.biomes.len()
    }

    /// Run the full pipeline for one tile frame.
    ///
    /// Pure given the frame: calling twice with identical arguments yields
    /// identical artifacts.
    pub fn generate(&self, frame: TileFrame) -> TileArtifacts {
        let frame = frame.with_resolution(self.config.general.resolution);
        let debug_cfg = &self.config.debug;
        let df = self.field.distance_field();
        let mut executed: Vec<&'static str> = Vec::new();

        // Classification.
        let regions = classify_regions(
            self.field.centers(),
            &self.config.biome_grid,
            self.field.sampler_noise(),
            &frame,
            self.biomes.len(),
        );
        executed.push("ClosestPointOnDisplacedGrid");
        let biome_masks = masks_from_regions(&regions, self.biomes.len());
        executed.push("MasksFromRegions");

        // Per-biome height fields, beach last.
        let masked_octaves = debug_cfg.add_mask && !debug_cfg.mask_all_octaves;
        let whole_field_mask = debug_cfg.add_mask && debug_cfg.mask_all_octaves;
        executed.push(if masked_octaves {
            "MaskedHeightMap"
        } else {
            "HeightMap"
        });
        if debug_cfg.apply_shaping {
            executed.push("ApplyShapingFunction");
        }
        if whole_field_mask {
            executed.push("ApplyDistanceField");
        }

        let mut heights: Vec<HeightField> = Vec::with_capacity(self.biomes.len() + 1);
        for (biome, lut) in self
            .biomes
            .iter()
            .zip(&self.biome_luts)
            .chain(std::iter::once((&self.beach, &self.beach_lut)))
        {
            let masking = if masked_octaves {
                OctaveMasking::MinorOctaves {
                    distance_field: df,
                    effect: self.config.island.distance_field_effect,
                }
            } else {
                OctaveMasking::Off
            };
            let shaping = debug_cfg.apply_shaping.then_some(lut);
            let mut height = generate_biome_height_field(
                self.field.height_noise(),
                biome,
                &frame,
                self.config.mesh.max_height,
                masking,
                shaping,
            );
            if whole_field_mask {
                apply_distance_weight(
                    &mut height,
                    df,
                    &frame,
                    self.config.island.distance_field_effect,
                );
            }
            heights.push(height);
        }
        let shore_height = heights.pop().expect("beach height field");

        // Shore mask.
        let shore_mask = generate_shore_mask(df, &self.shore_lut, &frame);
        executed.push("GenerateShoreMask");

        // Compositing: biome 0 is the accumulator.
        let mut iter = heights.into_iter();
        let mut acc = iter.next().expect("at least one biome");
        for (height, mask) in iter.zip(biome_masks.iter().skip(1)) {
            mix_in_place(&mut acc, &height, mask);
        }
        mix_in_place(&mut acc, &shore_height, &shore_mask);
        executed.push("MixBuffersInplace");

        if debug_cfg.add_mask {
            apply_water_cutoff(&mut acc, df, &frame);
            executed.push("ApplyWaterMask");
        }
        if debug_cfg.level_terrain {
            level_terrain(&mut acc, self.config.mesh.level_height);
            executed.push("Leveling");
        }

        let debug_image = debug_cfg.layer.map(|layer| {
            self.render_debug_layer(layer, &frame, &acc, &regions, &biome_masks, &shore_mask)
        });

        debug!(
            offset_x = frame.offset.x,
            offset_y = frame.offset.y,
            zoom = frame.zoom,
            passes = executed.len(),
            "tile generated"
        );

        TileArtifacts {
            height: acc,
            debug_image,
            passes: executed,
        }
    }

    fn render_debug_layer(
        &self,
        layer: DebugLayer,
        frame: &TileFrame,
        height: &HeightField,
        regions: &atoll_field::Grid2<u32>,
        biome_masks: &[atoll_field::Mask],
        shore_mask: &atoll_field::Mask,
    ) -> debug_viz::DebugImage {
        let df = self.field.distance_field();
        match layer {
            DebugLayer::HeightMap => {
                debug_viz::render_height_field(height, self.config.mesh.max_height)
            }
            DebugLayer::WaterMask => debug_viz::render_water_mask(df),
            DebugLayer::DistanceField => debug_viz::render_mask(df.as_mask()),
            DebugLayer::Uvs => debug_viz::render_uv_gradient(frame.resolution),
            DebugLayer::Regions => debug_viz::render_regions(regions),
            DebugLayer::Biomes => debug_viz::render_biome_blend(biome_masks, shore_mask),
            DebugLayer::Shore => debug_viz::render_mask(shore_mask),
        }
    }
}
