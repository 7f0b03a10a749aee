//! Configuration error type.
//!
//! Only configuration-time calls (`prepare`, `set_window`, ramp builds,
//! layout checks) return these. The per-sample paths never fail; they fall
//! back to a sentinel output and record a [`Fault`](crate::control::Fault).

use core::fmt;

/// Invalid parameter detected while configuring a component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DspError {
    /// Sample rate was zero, negative, or not finite.
    InvalidSampleRate(f64),
    /// A generator was used before `prepare()`.
    NotPrepared,
    /// Frequency was zero, negative, or not finite.
    InvalidFrequency(f32),
    /// RMS window of zero samples.
    WindowSizeZero,
    /// RMS window does not fit the fixed buffer.
    WindowTooLarge { requested: usize, capacity: usize },
    /// RMS window differs from the size locked in by an earlier call.
    WindowSizeChanged { locked: usize, requested: usize },
    /// Fade ramp longer than the fixed table.
    RampTooLong { requested: usize, capacity: usize },
    /// Fade curve was NaN or infinite.
    InvalidCurve(f32),
    /// Stereo-only operation asked to handle another channel count.
    UnsupportedChannelCount(usize),
    /// Channel index outside `{0, 1}`.
    InvalidChannel(usize),
    /// Scalar parameter outside its documented range.
    OutOfRange { parameter: &'static str, value: f32 },
}

impl fmt::Display for DspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DspError::InvalidSampleRate(rate) => {
                write!(f, "sample rate must be positive and finite, got {}", rate)
            }
            DspError::NotPrepared => write!(f, "prepare() must be called before generating"),
            DspError::InvalidFrequency(hz) => {
                write!(f, "frequency must be positive and finite, got {}", hz)
            }
            DspError::WindowSizeZero => write!(f, "RMS window size must be at least 1"),
            DspError::WindowTooLarge { requested, capacity } => write!(
                f,
                "RMS window of {} samples must be below the capacity of {}",
                requested, capacity
            ),
            DspError::WindowSizeChanged { locked, requested } => write!(
                f,
                "RMS window is locked at {} samples, got {}",
                locked, requested
            ),
            DspError::RampTooLong { requested, capacity } => write!(
                f,
                "fade ramp of {} samples exceeds the table capacity of {}",
                requested, capacity
            ),
            DspError::InvalidCurve(curve) => write!(f, "fade curve must be finite, got {}", curve),
            DspError::UnsupportedChannelCount(n) => {
                write!(f, "operation is stereo only, got {} channels", n)
            }
            DspError::InvalidChannel(ch) => write!(f, "channel index {} is not 0 or 1", ch),
            DspError::OutOfRange { parameter, value } => {
                write!(f, "{} out of range: {}", parameter, value)
            }
        }
    }
}
