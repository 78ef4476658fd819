use super::Vector2;

/// Returns the minimum distance from point `p` to the closed segment `a`-`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Vector2, a: &Vector2, b: &Vector2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Returns the perpendicular distance from `p` to the infinite line through `a`-`b`.
#[must_use]
pub fn point_to_line_dist(p: &Vector2, a: &Vector2, b: &Vector2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < 1e-10 {
        return (p - a).norm();
    }
    super::intersect_2d::cross_2d(&d, &(p - a)).abs() / len
}
