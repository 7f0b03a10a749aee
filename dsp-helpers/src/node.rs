use crate::control::FaultLatch;
use crate::error::DspError;

/// Core trait for stateful per-sample components.
///
/// The host calls `prepare()` once (or on reconfiguration) before streaming,
/// then drives the component's own per-sample methods from the audio thread.
pub trait AudioNode {
    /// Configure for the given sample rate and clear any running state.
    ///
    /// Rejects a rate that is zero, negative, or not finite.
    fn prepare(&mut self, sample_rate: f64) -> Result<(), DspError>;

    /// Clear running state without changing the configuration.
    fn reset(&mut self);

    /// Faults recorded by the per-sample path since the last drain.
    fn faults(&self) -> &FaultLatch;
}

/// Shared sample-rate validation for `prepare()` implementations.
pub(crate) fn validate_sample_rate(sample_rate: f64) -> Result<f64, DspError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        tracing::warn!(sample_rate, "rejected sample rate");
        Err(DspError::InvalidSampleRate(sample_rate))
    }
}
