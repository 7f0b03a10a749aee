//! Lock-free handoff between a control thread and the audio thread.
//!
//! # Contract
//!
//! - Only ONE thread may write an [`AtomicParam`] (the control/UI side).
//! - Only ONE thread may read it (the audio callback).
//! - [`FaultLatch`] is the reverse direction: the audio thread raises bits,
//!   the control thread drains them.
//!
//! Neither type locks, blocks, or allocates.

use core::sync::atomic::{AtomicU32, Ordering};

/// A scalar parameter shared between one writer and one reader.
///
/// The `f32` is stored as its bit pattern in an `AtomicU32`, so a read always
/// observes a complete value written by `set()`.
///
/// # Example
/// ```
/// use dsp_helpers::control::AtomicParam;
///
/// let pan = AtomicParam::new(0.5);
/// pan.set(0.25);               // control thread
/// assert_eq!(pan.get(), 0.25); // audio thread
/// ```
pub struct AtomicParam {
    bits: AtomicU32,
}

impl AtomicParam {
    /// Create a parameter holding `initial`.
    pub fn new(initial: f32) -> Self {
        AtomicParam {
            bits: AtomicU32::new(initial.to_bits()),
        }
    }

    /// Publish a new value (writer side).
    #[inline]
    pub fn set(&self, value: f32) {
        // Release pairs with the Acquire in get(): the reader sees this value
        // and everything the writer did before it.
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Read the latest published value (reader side).
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl Default for AtomicParam {
    fn default() -> Self {
        AtomicParam::new(0.0)
    }
}

impl core::fmt::Debug for AtomicParam {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("AtomicParam").field(&self.get()).finish()
    }
}

/// Domain errors caught on the per-sample path.
///
/// Each variant is one bit in a [`FaultLatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Fault {
    /// Generator called before `prepare()`.
    NotPrepared = 1 << 0,
    /// Frequency was zero, negative, or not finite; silence was emitted.
    InvalidFrequency = 1 << 1,
    /// A bounded parameter (depth, pan, threshold, coefficient) was clamped.
    ParameterClamped = 1 << 2,
    /// RMS update with a window size that is invalid or differs from the locked one.
    WindowMismatch = 1 << 3,
    /// Channel index outside the stereo pair.
    InvalidChannel = 1 << 4,
    /// Additive synthesis hit the harmonic cap.
    HarmonicsCapped = 1 << 5,
}

impl Fault {
    const ALL: [Fault; 6] = [
        Fault::NotPrepared,
        Fault::InvalidFrequency,
        Fault::ParameterClamped,
        Fault::WindowMismatch,
        Fault::InvalidChannel,
        Fault::HarmonicsCapped,
    ];
}

/// Sticky set of [`Fault`]s raised by the audio thread.
#[derive(Debug, Default)]
pub struct FaultLatch {
    bits: AtomicU32,
}

impl FaultLatch {
    pub const fn new() -> Self {
        FaultLatch {
            bits: AtomicU32::new(0),
        }
    }

    /// Record a fault. Safe to call from the audio thread.
    #[inline]
    pub fn raise(&self, fault: Fault) {
        self.bits.fetch_or(fault as u32, Ordering::Relaxed);
    }

    /// Whether `fault` has been raised since the last [`take`](Self::take).
    pub fn contains(&self, fault: Fault) -> bool {
        self.bits.load(Ordering::Relaxed) & fault as u32 != 0
    }

    pub fn is_clear(&self) -> bool {
        self.bits.load(Ordering::Relaxed) == 0
    }

    /// Drain all raised faults, returning them as a [`FaultSet`].
    pub fn take(&self) -> FaultSet {
        FaultSet(self.bits.swap(0, Ordering::Relaxed))
    }
}

/// Snapshot of drained faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaultSet(u32);

impl FaultSet {
    pub fn contains(self, fault: Fault) -> bool {
        self.0 & fault as u32 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the faults in this set.
    pub fn iter(self) -> impl Iterator<Item = Fault> {
        Fault::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn param_round_trips_exact_bits() {
        let p = AtomicParam::new(0.0);
        for v in [0.0f32, -0.0, 1.0, 0.333_333_34, f32::MIN_POSITIVE, 20_000.0] {
            p.set(v);
            assert_eq!(p.get().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn param_visible_across_threads() {
        let p = Arc::new(AtomicParam::new(0.0));
        let writer = Arc::clone(&p);

        let handle = thread::spawn(move || {
            for i in 1..=1000 {
                writer.set(i as f32);
            }
        });
        handle.join().unwrap();

        assert_eq!(p.get(), 1000.0);
    }

    #[test]
    fn reader_only_sees_written_values() {
        let p = Arc::new(AtomicParam::new(-1.0));
        let writer = Arc::clone(&p);

        let handle = thread::spawn(move || {
            for i in 0..10_000 {
                writer.set(i as f32 * 0.5);
            }
        });

        // Every observed value is either the initial one or one the writer stored.
        for _ in 0..10_000 {
            let v = p.get();
            assert!(v == -1.0 || (v >= 0.0 && (v * 2.0).fract() == 0.0), "torn read: {}", v);
        }
        handle.join().unwrap();
    }

    #[test]
    fn latch_collects_and_drains() {
        let latch = FaultLatch::new();
        assert!(latch.is_clear());

        latch.raise(Fault::ParameterClamped);
        latch.raise(Fault::InvalidFrequency);
        latch.raise(Fault::ParameterClamped);
        assert!(latch.contains(Fault::ParameterClamped));
        assert!(!latch.contains(Fault::NotPrepared));

        let set = latch.take();
        assert!(set.contains(Fault::InvalidFrequency));
        assert_eq!(set.iter().count(), 2);
        assert!(latch.is_clear());
        assert!(latch.take().is_empty());
    }
}
