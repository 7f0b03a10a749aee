//! Tremolo: amplitude modulation by an owned low-frequency oscillator.

use crate::control::{AtomicParam, Fault, FaultLatch};
use crate::dsp::helpers::{clamp_unit, is_valid_frequency};
use crate::error::DspError;
use crate::node::AudioNode;

use super::synth_oscillator::{Oscillator, Waveform};

/// Modulation shape. A subset of [`Waveform`]; the impulse train is not a
/// useful tremolo shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModWave {
    #[default]
    Sine,
    Saw,
    Square,
    Triangle,
}

impl From<ModWave> for Waveform {
    fn from(wave: ModWave) -> Self {
        match wave {
            ModWave::Sine => Waveform::Sine,
            ModWave::Saw => Waveform::Saw,
            ModWave::Square => Waveform::Square,
            ModWave::Triangle => Waveform::Triangle,
        }
    }
}

/// Parameters a control thread can move while audio runs.
///
/// The control side calls `set()` on the fields; the audio side hands the
/// struct to [`Tremolo::process_controlled`].
#[derive(Debug)]
pub struct TremoloControls {
    /// Modulation rate in Hz.
    pub frequency: AtomicParam,
    /// Modulation depth in `[0, 1]`.
    pub depth: AtomicParam,
}

impl TremoloControls {
    pub fn new(frequency: f32, depth: f32) -> Self {
        TremoloControls {
            frequency: AtomicParam::new(frequency),
            depth: AtomicParam::new(depth),
        }
    }
}

/// Tremolo effect: `sample · depth · |lfo|`.
///
/// # Example
/// ```
/// use dsp_helpers::node::AudioNode;
/// use dsp_helpers::nodes::{ModWave, Tremolo};
///
/// let mut trem = Tremolo::new();
/// trem.prepare(48_000.0).unwrap();
/// trem.set_frequency(5.0).unwrap();
/// trem.set_wave(ModWave::Square);
/// let out = trem.process(0.8, 0.5);
/// assert!(out.abs() <= 0.8);
/// ```
#[derive(Debug)]
pub struct Tremolo {
    oscillator: Oscillator,
    /// 0 until `set_frequency()`; the effect is silent until then.
    frequency: f32,
    wave: ModWave,
}

impl Tremolo {
    pub const fn new() -> Self {
        Tremolo {
            oscillator: Oscillator::new(),
            frequency: 0.0,
            wave: ModWave::Sine,
        }
    }

    /// Set the modulation rate. Must be positive and finite.
    pub fn set_frequency(&mut self, hz: f32) -> Result<(), DspError> {
        if !is_valid_frequency(hz) {
            tracing::warn!(hz, "tremolo frequency rejected");
            return Err(DspError::InvalidFrequency(hz));
        }
        self.frequency = hz;
        Ok(())
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn set_wave(&mut self, wave: ModWave) {
        self.wave = wave;
    }

    pub fn wave(&self) -> ModWave {
        self.wave
    }

    /// Modulate one sample.
    ///
    /// `depth` outside `[0, 1]` is clamped and raises
    /// [`Fault::ParameterClamped`]. Emits silence if the effect is unprepared
    /// or has no valid frequency.
    #[inline]
    pub fn process(&mut self, sample: f32, depth: f32) -> f32 {
        let (depth, clamped) = clamp_unit(depth);
        if clamped {
            self.oscillator.faults().raise(Fault::ParameterClamped);
        }
        let lfo = self
            .oscillator
            .generate(self.wave.into(), self.frequency, 0.0);
        sample * depth * libm::fabsf(lfo)
    }

    /// Pull the latest frequency from `controls` and process with its depth.
    ///
    /// A published frequency that is not positive and finite is ignored; the
    /// previous rate is kept and [`Fault::InvalidFrequency`] is raised.
    #[inline]
    pub fn process_controlled(&mut self, sample: f32, controls: &TremoloControls) -> f32 {
        self.sync(controls);
        self.process(sample, controls.depth.get())
    }

    /// Adopt the frequency published in `controls`.
    #[inline]
    pub fn sync(&mut self, controls: &TremoloControls) {
        let hz = controls.frequency.get();
        if is_valid_frequency(hz) {
            self.frequency = hz;
        } else {
            self.oscillator.faults().raise(Fault::InvalidFrequency);
        }
    }
}

impl Default for Tremolo {
    fn default() -> Self {
        Tremolo::new()
    }
}

impl AudioNode for Tremolo {
    fn prepare(&mut self, sample_rate: f64) -> Result<(), DspError> {
        self.oscillator.prepare(sample_rate)
    }

    fn reset(&mut self) {
        self.oscillator.reset();
    }

    fn faults(&self) -> &FaultLatch {
        self.oscillator.faults()
    }
}
