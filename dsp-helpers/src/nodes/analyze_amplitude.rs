//! Peak and windowed RMS level meter.
//!
//! Peak is a running maximum of `|sample|` until [`reset`](AmplitudeAnalyzer::reset).
//! RMS is computed over a sliding window held in a fixed circular buffer,
//! with an incremental sum of squares that is rebuilt from the buffer once
//! per window to stop floating-point drift.

use crate::constants::RMS_WINDOW_CAPACITY;
use crate::control::{Fault, FaultLatch};
use crate::dsp::decibels::gain_to_db;
use crate::error::DspError;

/// Level meter. `N` is the RMS buffer capacity; the window must be smaller.
///
/// The default capacity (one second at 192 kHz) makes this a large value;
/// keep it in a long-lived slot rather than moving it around.
///
/// # Example
/// ```
/// use dsp_helpers::nodes::AmplitudeAnalyzer;
///
/// let mut meter = AmplitudeAnalyzer::<4096>::new();
/// meter.set_window(1024).unwrap();
/// for _ in 0..2048 {
///     meter.update_peak(0.5);
///     meter.update_rms(0.5, 1024);
/// }
/// assert_eq!(meter.peak(), 0.5);
/// assert!((meter.rms() - 0.5).abs() < 1e-6);
/// ```
pub struct AmplitudeAnalyzer<const N: usize = RMS_WINDOW_CAPACITY> {
    peak: f32,
    rms: f32,
    window: [f32; N],
    /// Running sum of squares over `window[..window_size]`.
    sum_of_squares: f64,
    write_index: usize,
    /// Locked by the first valid `set_window()` or `update_rms()`.
    window_size: Option<usize>,
    faults: FaultLatch,
}

impl<const N: usize> AmplitudeAnalyzer<N> {
    pub const fn new() -> Self {
        AmplitudeAnalyzer {
            peak: 0.0,
            rms: 0.0,
            window: [0.0; N],
            sum_of_squares: 0.0,
            write_index: 0,
            window_size: None,
            faults: FaultLatch::new(),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn window_size(&self) -> Option<usize> {
        self.window_size
    }

    /// Fix the RMS window length. It cannot change afterwards.
    pub fn set_window(&mut self, window_size: usize) -> Result<(), DspError> {
        let result = check_window::<N>(self.window_size, window_size);
        match result {
            Ok(()) => {
                self.window_size = Some(window_size);
                tracing::debug!(window_size, capacity = N, "rms window set");
            }
            Err(ref e) => tracing::warn!(window_size, error = %e, "rms window rejected"),
        }
        result
    }

    /// Fold `|sample|` into the running peak.
    #[inline]
    pub fn update_peak(&mut self, sample: f32) {
        let magnitude = libm::fabsf(sample);
        if magnitude > self.peak {
            self.peak = magnitude;
        }
    }

    /// Highest `|sample|` seen since the last [`reset`](Self::reset).
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Peak in dBFS. `-inf` before any non-zero sample.
    pub fn peak_db(&self) -> f32 {
        gain_to_db(self.peak)
    }

    /// Zero the peak. RMS state is untouched.
    pub fn reset(&mut self) {
        self.peak = 0.0;
    }

    /// Push one sample into the RMS window and refresh [`rms`](Self::rms).
    ///
    /// The first call with a valid `window_size` locks it if `set_window()`
    /// was not used. A call whose size is invalid or differs from the locked
    /// one is dropped and raises [`Fault::WindowMismatch`].
    #[inline]
    pub fn update_rms(&mut self, sample: f32, window_size: usize) {
        let size = match self.window_size {
            Some(locked) if locked == window_size => locked,
            Some(_) => {
                self.faults.raise(Fault::WindowMismatch);
                return;
            }
            None => {
                if window_size == 0 || window_size >= N {
                    self.faults.raise(Fault::WindowMismatch);
                    return;
                }
                self.window_size = Some(window_size);
                window_size
            }
        };

        let old = self.window[self.write_index] as f64;
        let new = sample as f64;
        self.window[self.write_index] = sample;

        self.sum_of_squares += new * new - old * old;
        if self.sum_of_squares < 0.0 {
            // Cancellation residue after a loud passage.
            self.sum_of_squares = 0.0;
        }
        self.rms = libm::sqrt(self.sum_of_squares / size as f64) as f32;

        self.write_index += 1;
        if self.write_index >= size {
            self.write_index = 0;
            self.sum_of_squares = self.window[..size]
                .iter()
                .map(|&s| s as f64 * s as f64)
                .sum();
        }
    }

    /// RMS level as of the last `update_rms()` call.
    pub fn rms(&self) -> f32 {
        self.rms
    }

    /// RMS in dBFS.
    pub fn rms_db(&self) -> f32 {
        gain_to_db(self.rms)
    }

    /// Clear the RMS window and level. The locked window size is kept.
    pub fn reset_rms(&mut self) {
        let size = self.window_size.unwrap_or(0);
        self.window[..size].fill(0.0);
        self.sum_of_squares = 0.0;
        self.write_index = 0;
        self.rms = 0.0;
    }

    pub fn faults(&self) -> &FaultLatch {
        &self.faults
    }
}

fn check_window<const N: usize>(locked: Option<usize>, requested: usize) -> Result<(), DspError> {
    if requested == 0 {
        return Err(DspError::WindowSizeZero);
    }
    if requested >= N {
        return Err(DspError::WindowTooLarge {
            requested,
            capacity: N,
        });
    }
    match locked {
        Some(locked) if locked != requested => Err(DspError::WindowSizeChanged { locked, requested }),
        _ => Ok(()),
    }
}

impl<const N: usize> Default for AmplitudeAnalyzer<N> {
    fn default() -> Self {
        AmplitudeAnalyzer::new()
    }
}
