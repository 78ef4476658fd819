use crate::geometry::Point;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A repeated
/// closing point contributes nothing, so open and closed loops agree.
#[must_use]
pub fn signed_area_2d(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice * 0.5
}

/// Sum of edge lengths along a point chain, closing it if `closed`.
#[must_use]
pub fn chain_length(points: &[Point], closed: bool) -> f64 {
    let mut length: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    if closed {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            length += last.distance_to(first);
        }
    }
    length
}

/// Rotates a vertex loop to start at its leftmost-bottom vertex, so equal
/// loops report identical point lists.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point]) -> Vec<Point> {
    let mut rotated = points.to_vec();
    rotated.rotate_left(leftmost_bottom_index(points));
    rotated
}

/// Returns the index of the leftmost-bottommost vertex, or 0 for an empty slice.
#[must_use]
pub fn leftmost_bottom_index(points: &[Point]) -> usize {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.lexicographic_cmp(b))
        .map_or(0, |(i, _)| i)
}
