//! Per-sample DSP components.
//!
//! Stateful generators and meters ([`Oscillator`], [`Tremolo`],
//! [`AmplitudeAnalyzer`], [`FadeRamp`], [`Panner`]) plus the stateless stereo
//! and waveshaping maps. Components that need a sample rate implement
//! [`AudioNode`](crate::node::AudioNode).

mod synth_oscillator;
mod analyze_amplitude;
mod effect_tremolo;
mod effect_fade;
mod pan_law;
pub mod mid_side;
pub mod goniometer;
pub mod waveshaper;


pub use synth_oscillator::{Oscillator, Waveform};
pub use analyze_amplitude::AmplitudeAnalyzer;
pub use effect_tremolo::{ModWave, Tremolo, TremoloControls};
pub use effect_fade::{FadeDirection, FadeRamp};
pub use pan_law::{PanLaw, Panner};
pub use mid_side::MidSide;
pub use goniometer::{Point, Polar};
pub use waveshaper::Shape;
