//! Memoryless waveshaping distortion.
//!
//! Every map is a pure function of the current sample. Bounded parameters are
//! clamped into range rather than rejected, so these are safe to call from
//! the audio thread with whatever the UI last sent.

use core::f32::consts::FRAC_2_PI;

use crate::constants::{ARCTAN_COEFFICIENT_MAX, ARCTAN_COEFFICIENT_MIN};
use crate::dsp::helpers::{clamp_param, clamp_unit, sign};

/// `sign(sample)`: every non-zero input becomes ±1.
#[inline]
pub fn infinite_clip(sample: f32) -> f32 {
    sign(sample)
}

/// Pass positive half-cycles, zero the negative ones.
#[inline]
pub fn half_wave_rectify(sample: f32) -> f32 {
    if sample > 0.0 {
        sample
    } else {
        0.0
    }
}

/// `|sample|`.
#[inline]
pub fn full_wave_rectify(sample: f32) -> f32 {
    libm::fabsf(sample)
}

/// Clamp to `[−threshold, threshold]`. `threshold` is clamped into `[0, 1]`.
#[inline]
pub fn hard_clip(sample: f32, threshold: f32) -> f32 {
    let (threshold, _) = clamp_unit(threshold);
    if sample > threshold {
        threshold
    } else if sample < -threshold {
        -threshold
    } else {
        sample
    }
}

/// Cubic soft clip `x − x³/3`.
#[inline]
pub fn cubic(sample: f32) -> f32 {
    sample - sample * sample * sample / 3.0
}

/// `(2/π)·atan(coefficient · sample)`, output in `(−1, 1)`.
///
/// `coefficient` sets the drive and is clamped into `[1, 10]`.
#[inline]
pub fn arctan(sample: f32, coefficient: f32) -> f32 {
    let (k, _) = clamp_param(coefficient, ARCTAN_COEFFICIENT_MIN, ARCTAN_COEFFICIENT_MAX);
    FRAC_2_PI * libm::atanf(k * sample)
}

/// A waveshaping map selected at configuration time.
///
/// # Example
/// ```
/// use dsp_helpers::nodes::Shape;
///
/// let shaper = Shape::HardClip { threshold: 0.5 };
/// assert_eq!(shaper.apply(0.9), 0.5);
/// assert_eq!(shaper.apply(-0.2), -0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Pass-through.
    #[default]
    Clean,
    InfiniteClip,
    HalfWaveRectify,
    FullWaveRectify,
    HardClip { threshold: f32 },
    Cubic,
    Arctan { coefficient: f32 },
}

impl Shape {
    #[inline]
    pub fn apply(self, sample: f32) -> f32 {
        match self {
            Shape::Clean => sample,
            Shape::InfiniteClip => infinite_clip(sample),
            Shape::HalfWaveRectify => half_wave_rectify(sample),
            Shape::FullWaveRectify => full_wave_rectify(sample),
            Shape::HardClip { threshold } => hard_clip(sample, threshold),
            Shape::Cubic => cubic(sample),
            Shape::Arctan { coefficient } => arctan(sample, coefficient),
        }
    }
}
