//! Periodic waveform generator driven by a time accumulator.
//!
//! Sine is computed directly. Square, saw, triangle and impulse train are
//! additive: a Fourier series summed up to the highest harmonic below
//! Nyquist.

use core::f64::consts::PI;

use crate::constants::MAX_HARMONICS;
use crate::control::{Fault, FaultLatch};
use crate::dsp::helpers::is_valid_frequency;
use crate::error::DspError;
use crate::node::{validate_sample_rate, AudioNode};

/// Waveform selector for [`Oscillator::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Saw,
    Triangle,
    ImpulseTrain,
}

/// Harmonic count memoised on `(sample_rate, frequency)`.
///
/// Recomputed only when either key changes, so a steady tone pays for the
/// floor/divide once.
#[derive(Debug, Clone, Copy)]
struct HarmonicCache {
    sample_rate: f64,
    frequency: f32,
    count: u32,
    capped: bool,
}

impl HarmonicCache {
    const fn empty() -> Self {
        HarmonicCache {
            sample_rate: 0.0,
            frequency: 0.0,
            count: 0,
            capped: false,
        }
    }

    /// `floor(sample_rate / (2 * frequency))`, limited to [`MAX_HARMONICS`].
    #[inline]
    fn lookup(&mut self, sample_rate: f64, frequency: f32) -> (u32, bool) {
        if self.sample_rate.to_bits() != sample_rate.to_bits()
            || self.frequency.to_bits() != frequency.to_bits()
        {
            let nyquist = libm::floor(sample_rate / (2.0 * frequency as f64));
            let capped = nyquist > MAX_HARMONICS as f64;
            self.count = if capped { MAX_HARMONICS } else { nyquist as u32 };
            self.capped = capped;
            self.sample_rate = sample_rate;
            self.frequency = frequency;
        }
        (self.count, self.capped)
    }
}

/// Weighted sum of `sin(h * theta)` for `h` in `1..=count`.
///
/// Uses the recurrence `sin((h+1)θ) = 2cos(θ)·sin(hθ) − sin((h−1)θ)`, so the
/// cost is two trig calls plus `count` multiply-adds.
#[inline]
fn harmonic_sum(theta: f64, count: u32, odd_only: bool, weight: impl Fn(f64) -> f64) -> f64 {
    let two_cos = 2.0 * libm::cos(theta);
    let mut prev = 0.0; // sin(0)
    let mut curr = libm::sin(theta);
    let mut sum = 0.0;

    for h in 1..=count {
        if !odd_only || h % 2 == 1 {
            sum += weight(h as f64) * curr;
        }
        let next = two_cos * curr - prev;
        prev = curr;
        curr = next;
    }
    sum
}

/// Sine and additive-synthesis oscillator.
///
/// Time advances by `1 / sample_rate` per generated sample and wraps back to
/// zero once it reaches one second. The clock is kept as a sample count so
/// the wrap lands exactly on sample `sample_rate` for integer rates.
///
/// # Example
/// ```
/// use dsp_helpers::node::AudioNode;
/// use dsp_helpers::nodes::{Oscillator, Waveform};
///
/// let mut osc = Oscillator::new();
/// osc.prepare(48_000.0).unwrap();
/// let first = osc.generate(Waveform::Sine, 440.0, 0.0);
/// assert_eq!(first, 0.0);
/// ```
#[derive(Debug)]
pub struct Oscillator {
    /// 0 until `prepare()`.
    sample_rate: f64,
    time_step: f64,
    /// Samples generated since the last one-second wrap.
    sample_index: u64,
    harmonics: HarmonicCache,
    faults: FaultLatch,
}

impl Oscillator {
    /// Create an unprepared oscillator. Generates silence until `prepare()`.
    pub const fn new() -> Self {
        Oscillator {
            sample_rate: 0.0,
            time_step: 0.0,
            sample_index: 0,
            harmonics: HarmonicCache::empty(),
            faults: FaultLatch::new(),
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.sample_rate > 0.0
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Seconds advanced per sample (`1 / sample_rate`).
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Current position of the time accumulator in seconds, in `[0, 1)`.
    pub fn time(&self) -> f64 {
        if self.is_prepared() {
            self.sample_index as f64 / self.sample_rate
        } else {
            0.0
        }
    }

    /// Generate one sample of `wave` and advance the clock.
    ///
    /// `phase_offset` is in radians. Returns `0.0` without advancing time if
    /// the oscillator is unprepared or the frequency cannot be synthesised
    /// (non-positive, non-finite, or above Nyquist for the additive shapes).
    #[inline]
    pub fn generate(&mut self, wave: Waveform, frequency: f32, phase_offset: f32) -> f32 {
        if !self.is_prepared() {
            self.faults.raise(Fault::NotPrepared);
            return 0.0;
        }
        if !is_valid_frequency(frequency) {
            self.faults.raise(Fault::InvalidFrequency);
            return 0.0;
        }

        let theta = 2.0 * PI * frequency as f64 * self.time() + phase_offset as f64;

        let value = match wave {
            Waveform::Sine => libm::sin(theta),
            _ => {
                let (count, capped) = self.harmonics.lookup(self.sample_rate, frequency);
                if count == 0 {
                    self.faults.raise(Fault::InvalidFrequency);
                    return 0.0;
                }
                if capped {
                    self.faults.raise(Fault::HarmonicsCapped);
                }
                additive(wave, theta, count)
            }
        };

        self.advance();
        value as f32
    }

    /// Checked form of [`generate`](Self::generate) for non-real-time callers.
    pub fn try_generate(
        &mut self,
        wave: Waveform,
        frequency: f32,
        phase_offset: f32,
    ) -> Result<f32, DspError> {
        if !self.is_prepared() {
            return Err(DspError::NotPrepared);
        }
        if !is_valid_frequency(frequency) || frequency as f64 > self.sample_rate / 2.0 {
            return Err(DspError::InvalidFrequency(frequency));
        }
        Ok(self.generate(wave, frequency, phase_offset))
    }

    /// `sin(2π·f·t + φ)`.
    #[inline]
    pub fn sine(&mut self, frequency: f32, phase_offset: f32) -> f32 {
        self.generate(Waveform::Sine, frequency, phase_offset)
    }

    /// Odd harmonics at `1/h`, scaled by `4/π`.
    #[inline]
    pub fn square(&mut self, frequency: f32, phase_offset: f32) -> f32 {
        self.generate(Waveform::Square, frequency, phase_offset)
    }

    /// All harmonics at `1/h`; output `0.5 − sum/π`.
    #[inline]
    pub fn saw(&mut self, frequency: f32, phase_offset: f32) -> f32 {
        self.generate(Waveform::Saw, frequency, phase_offset)
    }

    /// Odd harmonics at `1/h²`, scaled by `8/π²`.
    #[inline]
    pub fn triangle(&mut self, frequency: f32, phase_offset: f32) -> f32 {
        self.generate(Waveform::Triangle, frequency, phase_offset)
    }

    /// All harmonics at unit weight, scaled by `π / (2·max_harmonic)`.
    #[inline]
    pub fn impulse_train(&mut self, frequency: f32, phase_offset: f32) -> f32 {
        self.generate(Waveform::ImpulseTrain, frequency, phase_offset)
    }

    #[inline]
    fn advance(&mut self) {
        self.sample_index += 1;
        if self.sample_index as f64 / self.sample_rate >= 1.0 {
            self.sample_index = 0;
        }
    }
}

#[inline]
fn additive(wave: Waveform, theta: f64, count: u32) -> f64 {
    match wave {
        Waveform::Square => 4.0 / PI * harmonic_sum(theta, count, true, |h| 1.0 / h),
        Waveform::Saw => 0.5 - harmonic_sum(theta, count, false, |h| 1.0 / h) / PI,
        Waveform::Triangle => {
            8.0 / (PI * PI) * harmonic_sum(theta, count, true, |h| 1.0 / (h * h))
        }
        Waveform::ImpulseTrain => {
            PI / (2.0 * count as f64) * harmonic_sum(theta, count, false, |_| 1.0)
        }
        Waveform::Sine => libm::sin(theta),
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Oscillator::new()
    }
}

impl AudioNode for Oscillator {
    fn prepare(&mut self, sample_rate: f64) -> Result<(), DspError> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        self.sample_rate = sample_rate;
        self.time_step = 1.0 / sample_rate;
        self.sample_index = 0;
        self.harmonics = HarmonicCache::empty();
        tracing::debug!(sample_rate, "oscillator prepared");
        Ok(())
    }

    fn reset(&mut self) {
        self.sample_index = 0;
    }

    fn faults(&self) -> &FaultLatch {
        &self.faults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(rate: f64) -> Oscillator {
        let mut osc = Oscillator::new();
        osc.prepare(rate).unwrap();
        osc
    }

    /// Direct, non-recurrent evaluation of one harmonic sum.
    fn reference_sum(theta: f64, count: u32, odd_only: bool, weight: impl Fn(f64) -> f64) -> f64 {
        (1..=count)
            .filter(|h| !odd_only || h % 2 == 1)
            .map(|h| weight(h as f64) * (h as f64 * theta).sin())
            .sum()
    }

    #[test]
    fn prepare_rejects_bad_rates() {
        let mut osc = Oscillator::new();
        assert_eq!(osc.prepare(0.0), Err(DspError::InvalidSampleRate(0.0)));
        assert!(osc.prepare(-44_100.0).is_err());
        assert!(osc.prepare(f64::NAN).is_err());
        assert!(!osc.is_prepared());

        osc.prepare(44_100.0).unwrap();
        assert!(osc.is_prepared());
        assert!((osc.time_step() - 1.0 / 44_100.0).abs() < 1e-15);
    }

    #[test]
    fn unprepared_is_silent_and_faults() {
        let mut osc = Oscillator::new();
        assert_eq!(osc.sine(440.0, 0.0), 0.0);
        assert_eq!(osc.square(440.0, 0.0), 0.0);
        assert!(osc.faults().contains(Fault::NotPrepared));
        assert_eq!(osc.try_generate(Waveform::Sine, 440.0, 0.0), Err(DspError::NotPrepared));
    }

    #[test]
    fn invalid_frequency_is_silent_and_holds_time() {
        let mut osc = prepared(48_000.0);
        osc.sine(440.0, 0.0);
        let t = osc.time();

        assert_eq!(osc.sine(0.0, 0.0), 0.0);
        assert_eq!(osc.saw(-10.0, 0.0), 0.0);
        assert_eq!(osc.square(f32::NAN, 0.0), 0.0);
        assert_eq!(osc.time(), t);
        assert!(osc.faults().take().contains(Fault::InvalidFrequency));

        assert_eq!(
            osc.try_generate(Waveform::Square, 30_000.0, 0.0),
            Err(DspError::InvalidFrequency(30_000.0))
        );
    }

    #[test]
    fn sine_matches_closed_form_for_one_second() {
        let mut osc = prepared(48_000.0);
        for n in 0..48_000u32 {
            let expected = (2.0 * PI * 440.0 * n as f64 / 48_000.0).sin();
            let got = osc.sine(440.0, 0.0);
            assert!(
                (got as f64 - expected).abs() < 1e-6,
                "n={}: got {}, expected {}",
                n, got, expected
            );
        }
        // Wrapped exactly at n = 48000.
        assert_eq!(osc.time(), 0.0);
        assert_eq!(osc.sine(440.0, 0.0), 0.0);
    }

    #[test]
    fn time_accumulator_wraps_for_fractional_rate() {
        let mut osc = prepared(44_117.647);
        for _ in 0..44_118 {
            osc.sine(100.0, 0.0);
            assert!(osc.time() < 1.0);
        }
        assert_eq!(osc.time(), 0.0);
    }

    #[test]
    fn phase_offset_shifts_sine() {
        let mut osc = prepared(48_000.0);
        let v = osc.sine(440.0, core::f32::consts::FRAC_PI_2);
        assert!((v - 1.0).abs() < 1e-6, "cos(0) expected, got {}", v);
    }

    #[test]
    fn recurrence_matches_direct_sum() {
        for &theta in &[0.001, 0.3, 1.0, 2.5, 3.1, 5.9, 40.0] {
            for &count in &[1u32, 2, 7, 100, 1200] {
                let fast = harmonic_sum(theta, count, false, |h| 1.0 / h);
                let slow = reference_sum(theta, count, false, |h| 1.0 / h);
                assert!((fast - slow).abs() < 1e-8, "theta={} count={}", theta, count);

                let fast = harmonic_sum(theta, count, true, |h| 1.0 / (h * h));
                let slow = reference_sum(theta, count, true, |h| 1.0 / (h * h));
                assert!((fast - slow).abs() < 1e-8, "theta={} count={}", theta, count);
            }
        }
    }

    #[test]
    fn harmonic_count_is_nyquist_limited() {
        let mut cache = HarmonicCache::empty();
        assert_eq!(cache.lookup(48_000.0, 440.0), (54, false));
        assert_eq!(cache.lookup(48_000.0, 12_000.0), (2, false));
        assert_eq!(cache.lookup(48_000.0, 24_000.0), (1, false));
        assert_eq!(cache.lookup(48_000.0, 30_000.0), (0, false));
        assert_eq!(cache.lookup(192_000.0, 20.0), (4800, false));
        assert_eq!(cache.lookup(192_000.0, 10.0), (MAX_HARMONICS, true));
    }

    #[test]
    fn harmonic_cap_raises_fault() {
        let mut osc = prepared(192_000.0);
        osc.square(5.0, 0.0);
        assert!(osc.faults().contains(Fault::HarmonicsCapped));
    }

    #[test]
    fn additive_shapes_match_series_definitions() {
        let mut osc = prepared(48_000.0);
        let f = 1000.0f32;
        let count = 24u32;
        for n in 0..200u32 {
            let theta = 2.0 * PI * f as f64 * n as f64 / 48_000.0;
            let square = 4.0 / PI * reference_sum(theta, count, true, |h| 1.0 / h);
            assert!((osc.square(f, 0.0) as f64 - square).abs() < 1e-5, "square n={}", n);
        }

        let mut osc = prepared(48_000.0);
        for n in 0..200u32 {
            let theta = 2.0 * PI * f as f64 * n as f64 / 48_000.0;
            let saw = 0.5 - reference_sum(theta, count, false, |h| 1.0 / h) / PI;
            assert!((osc.saw(f, 0.0) as f64 - saw).abs() < 1e-5, "saw n={}", n);
        }

        let mut osc = prepared(48_000.0);
        for n in 0..200u32 {
            let theta = 2.0 * PI * f as f64 * n as f64 / 48_000.0;
            let tri = 8.0 / (PI * PI) * reference_sum(theta, count, true, |h| 1.0 / (h * h));
            assert!((osc.triangle(f, 0.0) as f64 - tri).abs() < 1e-5, "triangle n={}", n);
        }

        let mut osc = prepared(48_000.0);
        for n in 0..200u32 {
            let theta = 2.0 * PI * f as f64 * n as f64 / 48_000.0;
            let imp = PI / (2.0 * count as f64) * reference_sum(theta, count, false, |_| 1.0);
            assert!((osc.impulse_train(f, 0.0) as f64 - imp).abs() < 1e-5, "impulse n={}", n);
        }
    }

    #[test]
    fn additive_shapes_stay_bounded_across_sweep() {
        for &f in &[20.0f32, 110.0, 440.0, 1000.0, 5000.0, 11_999.0] {
            let mut osc = prepared(48_000.0);
            let (mut sq_max, mut tri_max, mut imp_max) = (0.0f32, 0.0f32, 0.0f32);
            let (mut saw_lo, mut saw_hi) = (f32::MAX, f32::MIN);

            for _ in 0..4800 {
                sq_max = sq_max.max(osc.square(f, 0.0).abs());
                tri_max = tri_max.max(osc.triangle(f, 0.0).abs());
                imp_max = imp_max.max(osc.impulse_train(f, 0.0).abs());
                let s = osc.saw(f, 0.0);
                saw_lo = saw_lo.min(s);
                saw_hi = saw_hi.max(s);
            }

            // Truncated series peak highest with a single harmonic (near
            // Nyquist): 4/π for the square, π/2 for the impulse train.
            assert!(sq_max <= 4.0 / core::f32::consts::PI + 1e-4, "square at {} Hz peaked at {}", f, sq_max);
            assert!(tri_max <= 1.0 + 1e-6, "triangle at {} Hz peaked at {}", f, tri_max);
            assert!(imp_max <= core::f32::consts::FRAC_PI_2 + 1e-4, "impulse at {} Hz peaked at {}", f, imp_max);
            assert!(saw_lo > -0.2 && saw_hi < 1.2, "saw at {} Hz spans {}..{}", f, saw_lo, saw_hi);
        }
    }

    #[test]
    fn square_reaches_unit_level_at_low_frequency() {
        let mut osc = prepared(48_000.0);
        // Quarter period of 100 Hz: the flat top of the square.
        for _ in 0..120 {
            osc.square(100.0, 0.0);
        }
        let v = osc.square(100.0, 0.0);
        assert!((v - 1.0).abs() < 0.05, "expected ~1.0, got {}", v);
    }

    #[test]
    fn reset_restarts_clock() {
        let mut osc = prepared(48_000.0);
        for _ in 0..100 {
            osc.sine(440.0, 0.0);
        }
        assert!(osc.time() > 0.0);
        osc.reset();
        assert_eq!(osc.time(), 0.0);
        assert_eq!(osc.sample_rate(), 48_000.0);
    }
}
