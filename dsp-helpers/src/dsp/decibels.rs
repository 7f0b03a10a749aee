//! Linear gain ↔ decibel conversion.

/// Convert a linear gain to decibels: `20 * log10(gain)`.
///
/// A gain of `0.0` gives `f32::NEG_INFINITY`.
#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    20.0 * libm::log10f(gain)
}

/// Convert decibels to a linear gain: `10^(db / 20)`.
///
/// `f32::NEG_INFINITY` gives `0.0`.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    libm::powf(10.0, db / 20.0)
}
