use std::cmp::Ordering;
use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::{Vector2, TOLERANCE};

/// A 2D coordinate with tolerance-based equality.
///
/// Two points compare equal when both coordinate differences are within
/// [`TOLERANCE`]; equal points are the same vertex of an arrangement.
/// Because the predicate is not transitive, `Point` is deliberately not
/// `Hash` or `Eq`.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the coordinates as a vector from the origin.
    #[must_use]
    pub fn coords(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Builds a point from vector coordinates.
    #[must_use]
    pub fn from_coords(v: &Vector2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.coords() - self.coords()).norm()
    }

    /// Angle of the vector from this point towards `other`, measured
    /// counter-clockwise from the +x axis, in `(-pi, pi]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the points are equal.
    pub fn angle_towards(&self, other: &Point) -> Result<f64> {
        if self == other {
            return Err(GeometryError::DegenerateSegment {
                x: self.x,
                y: self.y,
            }
            .into());
        }
        Ok((other.y - self.y).atan2(other.x - self.x))
    }

    /// Midpoint between this point and `other`.
    #[must_use]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Orders points by x, then y, treating coordinates within tolerance as equal.
    #[must_use]
    pub fn lexicographic_cmp(&self, other: &Point) -> Ordering {
        let by_x = tolerant_cmp(self.x, other.x);
        if by_x.is_ne() {
            return by_x;
        }
        tolerant_cmp(self.y, other.y)
    }
}

fn tolerant_cmp(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= TOLERANCE {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= TOLERANCE && (self.y - other.y).abs() <= TOLERANCE
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.x, self.y)
    }
}
