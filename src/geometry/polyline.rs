use crate::error::{GeometryError, Result};

use super::{LineSegment, Point};

/// A chain of wall vertices, as drawn.
///
/// Consecutive vertices are joined by straight segments. For closed
/// polylines the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    #[must_use]
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Creates a polyline from `(x, y)` pairs.
    #[must_use]
    pub fn from_coords(coords: &[(f64, f64)], closed: bool) -> Self {
        Self {
            points: coords.iter().copied().map(Point::from).collect(),
            closed,
        }
    }

    /// Returns the number of vertex-to-vertex steps, including zero-length ones.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Converts the polyline to line segments, skipping zero-length steps
    /// between repeated vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolyline` if no segment of positive
    /// length remains.
    pub fn segments(&self) -> Result<Vec<LineSegment>> {
        let n = self.points.len();
        let mut segments = Vec::with_capacity(self.segment_count());
        for i in 0..self.segment_count() {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            if a == b {
                continue;
            }
            segments.push(LineSegment::new(a, b)?);
        }
        if segments.is_empty() {
            return Err(GeometryError::DegeneratePolyline(format!(
                "{n} vertices yield no segment of positive length"
            ))
            .into());
        }
        Ok(segments)
    }

    /// Returns a new polyline with vertices in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            closed: self.closed,
        }
    }
}
