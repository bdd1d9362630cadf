//! Shore blend mask from the cached water distance field.

use atoll_config::CurveLut;
use atoll_field::Mask;

use crate::{DistanceField, TileFrame};

/// Build the shore blend mask for a tile frame.
///
/// Each cell samples the normalized water distance (bilinearly, since the
/// distance field lives at island resolution) and maps it through the baked
/// shore curve: with the default descending ramp, cells at the waterline get
/// weight 1 and cells far inland get 0.
pub fn generate_shore_mask(
    distance_field: &DistanceField,
    shore_lut: &CurveLut,
    frame: &TileFrame,
) -> Mask {
    let res = frame.resolution;
    let mut mask = Mask::new(res, 0.0);

    for y in 0..res {
        for x in 0..res {
            let uv = frame.uv(x, y);
            let d = distance_field.value_at(uv.x, uv.y);
            mask.set(x, y, shore_lut.sample(d).clamp(0.0, 1.0));
        }
    }

    mask
}
