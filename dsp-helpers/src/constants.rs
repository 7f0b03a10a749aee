/// Capacity of the RMS window: one second of audio at 192 kHz.
pub const RMS_WINDOW_CAPACITY: usize = 192_000;

/// Capacity of a fade ramp table in samples.
pub const FADE_TABLE_CAPACITY: usize = 8192;

/// Upper bound on the harmonics summed per additive-synthesis sample.
///
/// `192_000 / (2 * 20)`: the full series for any audible fundamental at any
/// common sample rate.
pub const MAX_HARMONICS: u32 = 4800;

/// Curve shape used by the fade builder when asked for a curve of exactly 0.
pub const ZERO_CURVE_SUBSTITUTE: f32 = 0.1;

/// Valid range for the arctan waveshaper drive coefficient.
pub const ARCTAN_COEFFICIENT_MIN: f32 = 1.0;
pub const ARCTAN_COEFFICIENT_MAX: f32 = 10.0;
