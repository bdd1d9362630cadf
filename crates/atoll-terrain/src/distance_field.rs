//! Approximate Euclidean distance transform of the water mask.
//!
//! Runs a fixed number of local relaxation passes: every cell takes the
//! minimum of its own distance and each 4-neighbor's distance plus one, with
//! water cells pinned at zero. Passes are double-buffered — each pass reads
//! the previous pass's complete output — and the result is normalized by the
//! global maximum into `[0, 1]`. Iteration count trades quality for cost;
//! the result is deterministic for a given mask and count.

use atoll_field::Mask;

/// The normalized water distance field, cached once per world.
///
/// Read-only after construction; sampled bilinearly by every tile generation
/// regardless of tile resolution or position.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceField {
    field: Mask,
}

impl DistanceField {
    /// Normalized distance at map-normalized coordinates `(u, v)`.
    #[inline]
    pub fn value_at(&self, u: f32, v: f32) -> f32 {
        self.field.sample_bilinear(u, v)
    }

    /// Distance-falloff weight at `(u, v)`: ramps 0 → 1 over `effect` and
    /// saturates beyond it.
    #[inline]
    pub fn weight_at(&self, u: f32, v: f32, effect: f32) -> f32 {
        if effect <= 0.0 {
            return 1.0;
        }
        (self.value_at(u, v) / effect).clamp(0.0, 1.0)
    }

    /// Whether `(u, v)` lies in water (zero distance).
    #[inline]
    pub fn is_water(&self, u: f32, v: f32) -> bool {
        self.value_at(u, v) <= f32::EPSILON
    }

    /// The underlying normalized grid.
    pub fn as_mask(&self) -> &Mask {
        &self.field
    }
}

/// Compute the normalized distance field from a water mask (1 = land,
/// 0 = water) with `iterations` relaxation passes.
pub fn compute_distance_field(water_mask: &Mask, iterations: u32) -> DistanceField {
    let res = water_mask.size();

    // Seed: water at zero, land unreachable until a pass relaxes it.
    let mut front = Mask::new(res, 0.0);
    for y in 0..res {
        for x in 0..res {
            let seed = if *water_mask.get(x, y) < 0.5 {
                0.0
            } else {
                f32::INFINITY
            };
            front.set(x, y, seed);
        }
    }
    let mut back = front.clone();

    for _ in 0..iterations {
        for y in 0..res {
            for x in 0..res {
                let mut best = *front.get(x, y);
                if x > 0 {
                    best = best.min(*front.get(x - 1, y) + 1.0);
                }
                if x + 1 < res {
                    best = best.min(*front.get(x + 1, y) + 1.0);
                }
                if y > 0 {
                    best = best.min(*front.get(x, y - 1) + 1.0);
                }
                if y + 1 < res {
                    best = best.min(*front.get(x, y + 1) + 1.0);
                }
                back.set(x, y, best);
            }
        }
        std::mem::swap(&mut front, &mut back);
    }

    normalize(&mut front);
    DistanceField { field: front }
}

/// Divide every cell by the global maximum finite value.
///
/// Cells the relaxation never reached clamp to 1.0; an all-water mask stays
/// all zeros.
fn normalize(field: &mut Mask) {
    let max = field
        .as_slice()
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f32, f32::max);

    for cell in field.as_mut_slice() {
        *cell = if !cell.is_finite() {
            1.0
        } else if max > 0.0 {
            *cell / max
        } else {
            0.0
        };
    }
}
