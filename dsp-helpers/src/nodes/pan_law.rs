//! Stereo panning laws.
//!
//! For channel 0 (left) the law is evaluated at `v = 1 − pan`, for channel 1
//! (right) at `v = pan`. `pan = 0` is hard left, `pan = 1` hard right.

use core::f32::consts::FRAC_PI_2;

use crate::control::{Fault, FaultLatch};
use crate::dsp::helpers::clamp_unit;
use crate::error::DspError;

/// Gain curve applied to the per-channel pan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanLaw {
    /// `v`. −6 dB at centre.
    #[default]
    Linear,
    /// `sin(v·π/2)`. Equal power, −3 dB at centre.
    PowerSine,
    /// `√v`. Equal power, −3 dB at centre.
    PowerSquare,
    /// `v^0.75`. Between linear and equal power.
    ModifiedSine,
    /// `√(v·sin(v·π/2))`.
    ModifiedSquare,
}

impl PanLaw {
    /// Gain for a channel position `v` in `[0, 1]`.
    #[inline]
    pub fn evaluate(self, v: f32) -> f32 {
        match self {
            PanLaw::Linear => v,
            PanLaw::PowerSine => libm::sinf(v * FRAC_PI_2),
            PanLaw::PowerSquare => libm::sqrtf(v),
            PanLaw::ModifiedSine => libm::powf(v, 0.75),
            PanLaw::ModifiedSquare => libm::sqrtf(v * libm::sinf(v * FRAC_PI_2)),
        }
    }
}

/// Stereo panner holding the selected [`PanLaw`].
///
/// # Example
/// ```
/// use dsp_helpers::nodes::{PanLaw, Panner};
///
/// let panner = Panner::new(PanLaw::PowerSine);
/// panner.check_layout(2).unwrap();
/// let left = panner.process(0, 1.0, 0.0);
/// let right = panner.process(1, 1.0, 0.0);
/// assert_eq!((left, right), (1.0, 0.0));
/// ```
#[derive(Debug, Default)]
pub struct Panner {
    law: PanLaw,
    faults: FaultLatch,
}

impl Panner {
    pub const fn new(law: PanLaw) -> Self {
        Panner {
            law,
            faults: FaultLatch::new(),
        }
    }

    pub fn set_law(&mut self, law: PanLaw) {
        tracing::debug!(?law, "pan law selected");
        self.law = law;
    }

    pub fn law(&self) -> PanLaw {
        self.law
    }

    /// Confirm the host buffer is stereo. Call before streaming.
    pub fn check_layout(&self, num_channels: usize) -> Result<(), DspError> {
        if num_channels == 2 {
            Ok(())
        } else {
            tracing::warn!(num_channels, "panner needs a stereo layout");
            Err(DspError::UnsupportedChannelCount(num_channels))
        }
    }

    /// Gain of `channel` at `pan`, without the hot-path sentinels.
    pub fn try_gain(&self, channel: usize, pan: f32) -> Result<f32, DspError> {
        if channel > 1 {
            return Err(DspError::InvalidChannel(channel));
        }
        if !(0.0..=1.0).contains(&pan) {
            return Err(DspError::OutOfRange {
                parameter: "pan",
                value: pan,
            });
        }
        Ok(self.law.evaluate(position(channel, pan)))
    }

    /// Checked form of [`process`](Self::process) that also verifies the layout.
    pub fn try_process(
        &self,
        channel: usize,
        sample: f32,
        pan: f32,
        num_channels: usize,
    ) -> Result<f32, DspError> {
        self.check_layout(num_channels)?;
        Ok(sample * self.try_gain(channel, pan)?)
    }

    /// Pan one sample of `channel` (0 = left, 1 = right).
    ///
    /// A channel outside the pair yields silence and raises
    /// [`Fault::InvalidChannel`]. `pan` outside `[0, 1]` is clamped and
    /// raises [`Fault::ParameterClamped`].
    #[inline]
    pub fn process(&self, channel: usize, sample: f32, pan: f32) -> f32 {
        if channel > 1 {
            self.faults.raise(Fault::InvalidChannel);
            return 0.0;
        }
        let (pan, clamped) = clamp_unit(pan);
        if clamped {
            self.faults.raise(Fault::ParameterClamped);
        }
        sample * self.law.evaluate(position(channel, pan))
    }

    pub fn faults(&self) -> &FaultLatch {
        &self.faults
    }
}

#[inline(always)]
fn position(channel: usize, pan: f32) -> f32 {
    if channel == 0 {
        1.0 - pan
    } else {
        pan
    }
}
