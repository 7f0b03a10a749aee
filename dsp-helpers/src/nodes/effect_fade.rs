//! Precomputed fade-in / fade-out gain curves.
//!
//! The curve is built once into a fixed table at configuration time and then
//! read per sample. `ramp[i] = (e^(c·x) − 1) / (e^c − 1)` with `x` stepping
//! linearly from 0 to 1 (fade in) or 1 to 0 (fade out).
//!
//! Positive curves sag below the straight line and negative curves bulge
//! above it. No finite curve is exactly linear: the ramp only approaches a
//! straight line as the curve goes to 0, and `curve = 1` is already convex.

use crate::constants::{FADE_TABLE_CAPACITY, ZERO_CURVE_SUBSTITUTE};
use crate::error::DspError;

/// Which way a ramp moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FadeDirection {
    #[default]
    In,
    Out,
}

/// Fixed-capacity fade curve table.
///
/// # Example
/// ```
/// use dsp_helpers::nodes::{FadeDirection, FadeRamp};
///
/// let mut ramp: FadeRamp = FadeRamp::new();
/// ramp.build(480, FadeDirection::In, 1.0).unwrap();
/// let faded = ramp.apply(0.9, 0);
/// assert_eq!(faded, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FadeRamp<const N: usize = FADE_TABLE_CAPACITY> {
    table: [f32; N],
    len: usize,
    direction: FadeDirection,
    curve: f32,
}

impl<const N: usize> FadeRamp<N> {
    /// An empty ramp. [`gain`](Self::gain) returns unity until built.
    pub const fn new() -> Self {
        FadeRamp {
            table: [0.0; N],
            len: 0,
            direction: FadeDirection::In,
            curve: 1.0,
        }
    }

    /// Fill the table with `num_samples` gains.
    ///
    /// Fails if `num_samples` exceeds the capacity `N` or `curve` is not
    /// finite. A curve of exactly 0 is replaced by
    /// [`ZERO_CURVE_SUBSTITUTE`]. On error the previous ramp is kept.
    pub fn build(
        &mut self,
        num_samples: usize,
        direction: FadeDirection,
        curve: f32,
    ) -> Result<(), DspError> {
        if num_samples > N {
            tracing::warn!(num_samples, capacity = N, "fade ramp too long");
            return Err(DspError::RampTooLong {
                requested: num_samples,
                capacity: N,
            });
        }
        if !curve.is_finite() {
            tracing::warn!(curve, "fade curve rejected");
            return Err(DspError::InvalidCurve(curve));
        }

        let curve = if curve == 0.0 { ZERO_CURVE_SUBSTITUTE } else { curve };
        let c = curve as f64;
        let last = num_samples.saturating_sub(1).max(1) as f64;

        for (i, slot) in self.table[..num_samples].iter_mut().enumerate() {
            let t = if num_samples == 1 { 1.0 } else { i as f64 / last };
            let x = match direction {
                FadeDirection::In => t,
                FadeDirection::Out => 1.0 - t,
            };
            *slot = curve_gain(c, x) as f32;
        }

        self.len = num_samples;
        self.direction = direction;
        self.curve = curve;
        tracing::debug!(num_samples, ?direction, curve, "fade ramp built");
        Ok(())
    }

    /// Gain at sample offset `index`.
    ///
    /// Past the end of the ramp the final value is held. An empty ramp is unity.
    #[inline]
    pub fn gain(&self, index: usize) -> f32 {
        match self.len {
            0 => 1.0,
            len if index < len => self.table[index],
            len => self.table[len - 1],
        }
    }

    /// `sample · gain(index)`.
    #[inline]
    pub fn apply(&self, sample: f32, index: usize) -> f32 {
        sample * self.gain(index)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.table[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// The curve actually used, after the zero substitution.
    pub fn curve(&self) -> f32 {
        self.curve
    }
}

/// `(e^(c·x) − 1) / (e^c − 1)` for `x` in `[0, 1]`.
///
/// For positive `c` both exponentials are factored by `e^c` so large curves
/// underflow toward 0 instead of overflowing to `inf / inf`.
fn curve_gain(c: f64, x: f64) -> f64 {
    if c > 0.0 {
        libm::exp(c * (x - 1.0)) * libm::expm1(-c * x) / libm::expm1(-c)
    } else {
        libm::expm1(c * x) / libm::expm1(c)
    }
}

impl<const N: usize> Default for FadeRamp<N> {
    fn default() -> Self {
        FadeRamp::new()
    }
}
