//! User-authored shaping curves.
//!
//! A [`Curve`] is an ordered list of keyframes evaluated with piecewise-linear
//! interpolation. The pipeline never evaluates curves per cell; it bakes each
//! curve into a fixed-size lookup table ([`CurveLut`]) once per generation
//! call and interpolates between consecutive samples.

use serde::{Deserialize, Serialize};

/// Number of samples baked into a shaping lookup table.
pub const LUT_SAMPLES: usize = 100;

/// A single curve keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    /// Position along the input axis, in `[0, 1]`.
    pub t: f32,
    /// Curve value at `t`.
    pub value: f32,
}

/// Piecewise-linear keyframed curve over `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Keyframes, expected sorted by `t` ascending.
    pub keys: Vec<CurveKey>,
}

impl Curve {
    /// A two-key linear ramp from `(t0, v0)` to `(t1, v1)`.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self {
            keys: vec![CurveKey { t: t0, value: v0 }, CurveKey { t: t1, value: v1 }],
        }
    }

    /// The identity ramp `t -> t`.
    pub fn identity() -> Self {
        Self::linear(0.0, 0.0, 1.0, 1.0)
    }

    /// Evaluate the curve at `t`, clamping outside the keyframe range.
    ///
    /// An empty curve evaluates to 0.0.
    pub fn evaluate(&self, t: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        if t <= first.t {
            return first.value;
        }
        let last = self.keys.last().expect("non-empty");
        if t >= last.t {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.t && t <= b.t {
                let span = b.t - a.t;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let frac = (t - a.t) / span;
                return a.value + (b.value - a.value) * frac;
            }
        }
        last.value
    }

    /// Bake the curve into an `n`-sample lookup table over `[0, 1]`.
    ///
    /// Sample `i` holds the curve value at `i / n`, matching the original
    /// authoring tool's table conversion.
    pub fn to_lut(&self, n: usize) -> CurveLut {
        let samples = (0..n).map(|i| self.evaluate(i as f32 / n as f32)).collect();
        CurveLut { samples }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::identity()
    }
}

/// A baked curve: fixed samples with linear interpolation between them.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveLut {
    samples: Vec<f32>,
}

impl CurveLut {
    /// Sample the table at `t` in `[0, 1]` with linear interpolation between
    /// consecutive samples.
    pub fn sample(&self, t: f32) -> f32 {
        let n = self.samples.len();
        if n == 0 {
            return 0.0;
        }
        if n == 1 {
            return self.samples[0];
        }
        let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
        let idx = (pos.floor() as usize).min(n - 2);
        let frac = pos - idx as f32;
        self.samples[idx] + (self.samples[idx + 1] - self.samples[idx]) * frac
    }

    /// Number of baked samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
