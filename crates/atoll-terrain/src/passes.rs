//! The generation pipeline as an explicit ordered list of named passes.
//!
//! Each pass declares which buffers it reads and which it writes, instead of
//! scattering dispatch calls through imperative control flow. The CPU
//! executor in [`crate::TileGenerator`] walks the plan in order; a GPU
//! backend could be substituted pass-by-pass behind the same declarations.
//! Pass names are the historical kernel names.

use atoll_config::DebugConfig;

/// Lanes per dispatch group. Grid resolutions must be a multiple of this so
/// a whole number of groups covers the buffer exactly.
pub const GROUP_SIZE: usize = 64;

/// Returns `true` if `resolution` dispatches in whole groups.
#[inline]
pub fn is_group_aligned(resolution: usize) -> bool {
    resolution > 0 && resolution % GROUP_SIZE == 0
}

/// One named compute pass with declared buffer access.
///
/// A buffer listed in both `reads` and `writes` is updated in place; a
/// buffer listed only in `writes` is created by the pass.
#[derive(Debug, PartialEq, Eq)]
pub struct PassDesc {
    /// Kernel name.
    pub name: &'static str,
    /// Buffers the pass only reads.
    pub reads: &'static [&'static str],
    /// Buffers the pass writes (exclusively, for the duration of the pass).
    pub writes: &'static [&'static str],
}

/// A plan violated its declared buffer ordering.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanViolation {
    /// A pass reads a buffer nothing has materialized yet.
    #[error("pass {pass} reads {buffer} before any pass writes it")]
    ReadBeforeWrite {
        /// The offending pass.
        pass: &'static str,
        /// The unmaterialized buffer.
        buffer: &'static str,
    },
}

const MAKE_ISLAND_MASK: PassDesc = PassDesc {
    name: "MakeIslandMask",
    reads: &[],
    writes: &["water_mask"],
};
const GENERATE_RIVER: PassDesc = PassDesc {
    name: "GenerateRiver",
    reads: &["water_mask"],
    writes: &["water_mask"],
};
const COMPUTE_EDT: PassDesc = PassDesc {
    name: "ComputeEDT",
    reads: &["water_mask"],
    writes: &["distance_field"],
};
const NORMALIZE: PassDesc = PassDesc {
    name: "Normalize",
    reads: &["distance_field"],
    writes: &["distance_field"],
};
const DISPLACED_GRID_SAMPLER: PassDesc = PassDesc {
    name: "DisplacedGridSampler",
    reads: &[],
    writes: &["biome_centers"],
};

const CLOSEST_POINT: PassDesc = PassDesc {
    name: "ClosestPointOnDisplacedGrid",
    reads: &["biome_centers"],
    writes: &["regions"],
};
const MASKS_FROM_REGIONS: PassDesc = PassDesc {
    name: "MasksFromRegions",
    reads: &["regions"],
    writes: &["biome_masks"],
};
const HEIGHT_MAP: PassDesc = PassDesc {
    name: "HeightMap",
    reads: &[],
    writes: &["biome_heights"],
};
const MASKED_HEIGHT_MAP: PassDesc = PassDesc {
    name: "MaskedHeightMap",
    reads: &["distance_field"],
    writes: &["biome_heights"],
};
const APPLY_SHAPING_FUNCTION: PassDesc = PassDesc {
    name: "ApplyShapingFunction",
    reads: &["shaping_lut", "biome_heights"],
    writes: &["biome_heights"],
};
const APPLY_DISTANCE_FIELD: PassDesc = PassDesc {
    name: "ApplyDistanceField",
    reads: &["distance_field", "biome_heights"],
    writes: &["biome_heights"],
};
const GENERATE_SHORE_MASK: PassDesc = PassDesc {
    name: "GenerateShoreMask",
    reads: &["distance_field", "shore_lut"],
    writes: &["shore_mask"],
};
const MIX_BUFFERS_INPLACE: PassDesc = PassDesc {
    name: "MixBuffersInplace",
    reads: &["biome_heights", "biome_masks", "shore_mask"],
    writes: &["height_map"],
};
const APPLY_WATER_MASK: PassDesc = PassDesc {
    name: "ApplyWaterMask",
    reads: &["distance_field", "height_map"],
    writes: &["height_map"],
};
const LEVELING: PassDesc = PassDesc {
    name: "Leveling",
    reads: &["height_map"],
    writes: &["height_map"],
};
const GENERATE_MESH: PassDesc = PassDesc {
    name: "GenerateMesh",
    reads: &["height_map"],
    writes: &["vertices", "triangles"],
};

/// Buffers the world plan leaves materialized for every tile generation.
pub const WORLD_OUTPUTS: &[&str] = &["water_mask", "distance_field", "biome_centers"];

/// Host-provided inputs available to a tile plan without a writing pass.
pub const TILE_INPUTS: &[&str] = &["distance_field", "biome_centers", "shaping_lut", "shore_lut"];

/// The once-per-world plan: water mask, distance field, biome centers.
pub fn world_plan() -> Vec<&'static PassDesc> {
    vec![
        &MAKE_ISLAND_MASK,
        &GENERATE_RIVER,
        &COMPUTE_EDT,
        &NORMALIZE,
        &DISPLACED_GRID_SAMPLER,
    ]
}

/// The per-tile plan for the given generation toggles.
///
/// Mirrors the executor's control flow exactly: the executor records the
/// passes it runs and tests assert the two agree.
pub fn tile_plan(debug: &DebugConfig) -> Vec<&'static PassDesc> {
    let mut plan: Vec<&'static PassDesc> = vec![&CLOSEST_POINT, &MASKS_FROM_REGIONS];

    let masked_octaves = debug.add_mask && !debug.mask_all_octaves;
    plan.push(if masked_octaves {
        &MASKED_HEIGHT_MAP
    } else {
        &HEIGHT_MAP
    });
    if debug.apply_shaping {
        plan.push(&APPLY_SHAPING_FUNCTION);
    }
    if debug.add_mask && debug.mask_all_octaves {
        plan.push(&APPLY_DISTANCE_FIELD);
    }

    plan.push(&GENERATE_SHORE_MASK);
    plan.push(&MIX_BUFFERS_INPLACE);
    if debug.add_mask {
        plan.push(&APPLY_WATER_MASK);
    }
    if debug.level_terrain {
        plan.push(&LEVELING);
    }
    if !debug.layer_only {
        plan.push(&GENERATE_MESH);
    }

    plan
}

/// Check that every read in the plan is materialized by an earlier write or
/// listed in `provided`.
pub fn validate_ordering(
    plan: &[&'static PassDesc],
    provided: &[&str],
) -> Result<(), PlanViolation> {
    let mut written: Vec<&str> = provided.to_vec();
    for pass in plan {
        for read in pass.reads {
            if !written.contains(read) {
                return Err(PlanViolation::ReadBeforeWrite {
                    pass: pass.name,
                    buffer: read,
                });
            }
        }
        for write in pass.writes {
            if !written.contains(write) {
                written.push(write);
            }
        }
    }
    Ok(())
}
