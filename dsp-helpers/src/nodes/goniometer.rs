//! Stereo vectorscope coordinates.

/// A stereo sample in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polar {
    /// `atan2(left, right)`, in `(−π, π]`.
    pub theta: f32,
    /// `√(left² + right²)`.
    pub radius: f32,
}

/// A point on the display plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Convert a stereo sample to polar coordinates.
///
/// Mono material (L = R) lands on `θ = π/4`; the right channel is the
/// reference axis.
#[inline]
pub fn to_polar(left: f32, right: f32) -> Polar {
    Polar {
        theta: libm::atan2f(left, right),
        radius: libm::sqrtf(left * left + right * right),
    }
}

/// Convert polar coordinates to a plot point.
#[inline]
pub fn to_cartesian(radius: f32, theta: f32) -> Point {
    Point {
        x: radius * libm::cosf(theta),
        y: radius * libm::sinf(theta),
    }
}
