//! Mid/side encoding and stereo width.
//!
//! Convention: `mid = (L + R) / 2`, `side = (L − R) / 2`, so that
//! `L = mid + side` and `R = mid − side`.

/// A mid/side pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MidSide {
    pub mid: f32,
    pub side: f32,
}

/// Split a stereo sample into mid and side.
#[inline]
pub fn encode(left: f32, right: f32) -> MidSide {
    MidSide {
        mid: 0.5 * (left + right),
        side: 0.5 * (left - right),
    }
}

/// Rebuild `(left, right)` from mid and side.
#[inline]
pub fn decode(ms: MidSide) -> (f32, f32) {
    (ms.mid + ms.side, ms.mid - ms.side)
}

/// Reweight mid and side by `factor`: `mid' = (2 − factor)(L + R)`,
/// `side' = factor·(L − R)`.
///
/// `factor < 1` narrows toward mono, `factor > 1` widens, `factor = 2`
/// leaves only the side signal. The result is unnormalised; see
/// [`widen`] for a stereo output that is unchanged at `factor = 1`.
#[inline]
pub fn narrow_or_widen(left: f32, right: f32, factor: f32) -> MidSide {
    MidSide {
        mid: (2.0 - factor) * (left + right),
        side: factor * (left - right),
    }
}

/// Apply [`narrow_or_widen`] and decode back to stereo.
///
/// Scaled so `factor = 1` returns the input unchanged. Away from unity the
/// level is not compensated: `factor = 0` puts `L + R` on both channels,
/// twice the mid signal.
#[inline]
pub fn widen(left: f32, right: f32, factor: f32) -> (f32, f32) {
    let ms = narrow_or_widen(left, right, factor);
    decode(MidSide {
        mid: 0.5 * ms.mid,
        side: 0.5 * ms.side,
    })
}
