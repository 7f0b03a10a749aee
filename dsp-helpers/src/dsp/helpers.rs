//! Per-sample parameter sanitising.
//!
//! The hot paths never return errors. Out-of-range parameters are pulled
//! back into range here and the caller records a fault.

/// Clamp `value` into `[lo, hi]`.
///
/// Returns the clamped value and whether it had to move. NaN maps to `lo`.
#[inline(always)]
pub fn clamp_param(value: f32, lo: f32, hi: f32) -> (f32, bool) {
    if value >= lo && value <= hi {
        (value, false)
    } else if value > hi {
        (hi, true)
    } else {
        (lo, true)
    }
}

/// Clamp into the unit interval `[0, 1]`.
#[inline(always)]
pub fn clamp_unit(value: f32) -> (f32, bool) {
    clamp_param(value, 0.0, 1.0)
}

/// Whether `hz` can drive an oscillator: positive and finite.
#[inline(always)]
pub fn is_valid_frequency(hz: f32) -> bool {
    hz.is_finite() && hz > 0.0
}

/// `-1`, `0` or `+1` following the sign of `x`, with `0` for both zeros and NaN.
#[inline(always)]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
