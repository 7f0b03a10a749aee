//! # dsp-helpers
//!
//! A `no_std`, allocation-free collection of per-sample DSP building blocks
//! for real-time audio callbacks: waveform generators, level metering,
//! stereo imaging, waveshaping, tremolo and fade curves.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Config | [`constants`] / [`error`] | Fixed capacities, typed configuration errors |
//! | Trait | [`node`] | `AudioNode`: `prepare` / `reset` for rate-dependent components |
//! | Control | [`control`] | Lock-free parameter cells and fault reporting |
//! | Math | [`dsp`] | Decibel conversion, parameter sanitising |
//! | DSP | [`nodes`] | Oscillator, meter, tremolo, fade, panner, M/S, goniometer, waveshaper |
//!
//! ## Quick start
//!
//! ```
//! use dsp_helpers::node::AudioNode;
//! use dsp_helpers::nodes::{AmplitudeAnalyzer, ModWave, Oscillator, Tremolo};
//!
//! let mut synth = Oscillator::new();
//! let mut trem = Tremolo::new();
//! let mut meter = AmplitudeAnalyzer::<4096>::new();
//!
//! // Before streaming:
//! synth.prepare(48_000.0).unwrap();
//! trem.prepare(48_000.0).unwrap();
//! trem.set_frequency(5.0).unwrap();
//! trem.set_wave(ModWave::Square);
//! meter.set_window(480).unwrap();
//!
//! // In the audio callback, once per sample:
//! for _ in 0..480 {
//!     let s = 0.125 * synth.saw(200.0, 0.0);
//!     let s = trem.process(s, 0.5);
//!     meter.update_peak(s);
//!     meter.update_rms(s, 480);
//! }
//!
//! assert!(meter.peak() > 0.0);
//! assert!(synth.faults().is_clear());
//! ```
//!
//! ## Real-time contract
//!
//! - Configuration calls (`prepare`, `set_window`, `FadeRamp::build`,
//!   `set_frequency`, `check_layout`) return [`error::DspError`] and may log.
//! - Per-sample calls never allocate, lock, log, or panic. Bad input gives a
//!   sentinel (silence or a clamped parameter) and raises a
//!   [`control::Fault`] the control thread can drain.
//! - Additive synthesis costs O(harmonics) per sample, capped at
//!   [`constants::MAX_HARMONICS`].
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `serde` | no | `Serialize`/`Deserialize` on the configuration enums |

#![cfg_attr(not(test), no_std)]

pub mod constants;
pub mod error;
pub mod node;
pub mod control;
pub mod dsp;
pub mod nodes;

pub use error::DspError;
