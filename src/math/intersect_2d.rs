use super::{Vector2, PARALLEL_TOLERANCE};

/// Solves `p1 + t * d1 = p2 + u * d2` for the line parameters `(t, u)`.
///
/// Returns `None` when the directions are parallel relative to their lengths.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Vector2,
    d1: &Vector2,
    p2: &Vector2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() <= PARALLEL_TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let d = p2 - p1;
    let t = cross_2d(&d, d2) / cross;
    let u = cross_2d(&d, d1) / cross;
    Some((t, u))
}

/// Z component of the cross product of two planar vectors.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Point at parameter `t` along `origin + t * dir`.
#[must_use]
pub fn point_at(origin: &Vector2, dir: &Vector2, t: f64) -> Vector2 {
    origin + dir * t
}
