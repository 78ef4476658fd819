pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

use std::f64::consts::TAU;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Point-equality tolerance in drawing units.
///
/// Two points are the same arrangement vertex iff both coordinate
/// differences are within this value. Hand-drawn plans snap to far coarser
/// units, so this only absorbs float noise from intersection arithmetic.
pub const TOLERANCE: f64 = 1e-6;

/// Relative threshold under which two directions count as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Normalizes an angle to `[0, 2pi)`.
#[must_use]
pub fn normalize_angle(a: f64) -> f64 {
    let mut r = a % TAU;
    if r < 0.0 {
        r += TAU;
    }
    // `-tiny + TAU` rounds to TAU.
    if r >= TAU {
        r -= TAU;
    }
    r
}
