use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{point_to_line_dist, point_to_segment_dist};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::{Vector2, TOLERANCE};

use super::Point;

/// An undirected straight segment between two distinct points.
///
/// The endpoints are stored in lexicographic order (x, then y), so two
/// segments built from the same endpoints in either order are equal.
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    first: Point,
    second: Point,
}

impl LineSegment {
    /// Creates a segment between two points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the points are equal.
    pub fn new(a: Point, b: Point) -> Result<Self> {
        if a == b {
            return Err(GeometryError::DegenerateSegment { x: a.x, y: a.y }.into());
        }
        Ok(Self::ordered(a, b))
    }

    /// Creates a segment from raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the points are equal.
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Builds a segment from endpoints already known to be distinct.
    fn ordered(a: Point, b: Point) -> Self {
        if a.lexicographic_cmp(&b).is_gt() {
            Self {
                first: b,
                second: a,
            }
        } else {
            Self {
                first: a,
                second: b,
            }
        }
    }

    /// The lexicographically smaller endpoint.
    #[must_use]
    pub fn first(&self) -> Point {
        self.first
    }

    /// The lexicographically larger endpoint.
    #[must_use]
    pub fn second(&self) -> Point {
        self.second
    }

    #[must_use]
    pub fn endpoints(&self) -> [Point; 2] {
        [self.first, self.second]
    }

    /// Vector from `first` to `second`.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.second.coords() - self.first.coords()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.first.midpoint(&self.second)
    }

    /// Whether `p` is one of the two endpoints.
    #[must_use]
    pub fn has_endpoint(&self, p: &Point) -> bool {
        self.first == *p || self.second == *p
    }

    /// Returns the endpoint opposite to `p`, or `None` if `p` is not an endpoint.
    #[must_use]
    pub fn other_endpoint(&self, p: &Point) -> Option<Point> {
        if self.first == *p {
            Some(self.second)
        } else if self.second == *p {
            Some(self.first)
        } else {
            None
        }
    }

    /// Whether the two segments meet at exactly one common endpoint.
    #[must_use]
    pub fn shares_endpoint(&self, other: &LineSegment) -> bool {
        self.shared_endpoint(other).is_some()
    }

    /// Returns the endpoint shared with `other`, if exactly one is shared.
    #[must_use]
    pub fn shared_endpoint(&self, other: &LineSegment) -> Option<Point> {
        if self == other {
            return None;
        }
        self.endpoints()
            .into_iter()
            .find(|p| other.has_endpoint(p))
    }

    /// Whether `p` lies on the closed segment within tolerance.
    #[must_use]
    pub fn touches_point(&self, p: &Point) -> bool {
        point_to_segment_dist(&p.coords(), &self.first.coords(), &self.second.coords())
            <= TOLERANCE
    }

    /// Whether `p` lies on the segment strictly between the two endpoints.
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        !self.has_endpoint(p) && self.touches_point(p)
    }

    /// Position of the projection of `p` along the segment, `0` at `first`
    /// and `1` at `second`.
    fn param_of(&self, p: &Point) -> f64 {
        let d = self.direction();
        (p.coords() - self.first.coords()).dot(&d) / d.norm_squared()
    }

    /// Whether `other` lies on this segment's supporting line.
    fn is_collinear_with(&self, other: &LineSegment) -> bool {
        let (a, b) = (self.first.coords(), self.second.coords());
        point_to_line_dist(&other.first.coords(), &a, &b) <= TOLERANCE
            && point_to_line_dist(&other.second.coords(), &a, &b) <= TOLERANCE
    }

    /// Finds the point where the two segments cross.
    ///
    /// A T-junction (one segment's endpoint in the interior of the other)
    /// counts as a crossing and yields that endpoint. Segments that share an
    /// endpoint, overlap, or are parallel do not intersect.
    #[must_use]
    pub fn intersect(&self, other: &LineSegment) -> Option<Point> {
        if self.endpoints().iter().any(|p| other.has_endpoint(p)) {
            return None;
        }

        let (p1, d1) = (self.first.coords(), self.direction());
        let (p2, d2) = (other.first.coords(), other.direction());
        let (t, u) = line_line_intersect_2d(&p1, &d1, &p2, &d2)?;

        let t_slack = TOLERANCE / d1.norm();
        let u_slack = TOLERANCE / d2.norm();
        if t < -t_slack || t > 1.0 + t_slack || u < -u_slack || u > 1.0 + u_slack {
            return None;
        }

        let hit = Point::from_coords(&point_at(&p1, &d1, t));
        // Snap onto an existing endpoint so both sides split at the same vertex.
        let snapped = self
            .endpoints()
            .into_iter()
            .chain(other.endpoints())
            .find(|e| *e == hit)
            .unwrap_or(hit);
        Some(snapped)
    }

    /// Whether the two segments are collinear and share a sub-segment of
    /// positive length.
    #[must_use]
    pub fn overlaps(&self, other: &LineSegment) -> bool {
        if !self.is_collinear_with(other) {
            return false;
        }
        let len = self.length();
        let t1 = self.param_of(&other.first) * len;
        let t2 = self.param_of(&other.second) * len;
        let lo = t1.min(t2).max(0.0);
        let hi = t1.max(t2).min(len);
        hi - lo > TOLERANCE
    }

    /// Endpoints of either segment lying strictly inside the other, when the
    /// two overlap. Splitting both segments at these points turns the
    /// overlap into identical pieces.
    #[must_use]
    pub fn points_to_split_if_overlap(a: &LineSegment, b: &LineSegment) -> Vec<Point> {
        if !a.overlaps(b) {
            return Vec::new();
        }
        let mut points: Vec<Point> = Vec::new();
        let candidates = b
            .endpoints()
            .into_iter()
            .filter(|p| a.contains_point(p))
            .chain(a.endpoints().into_iter().filter(|p| b.contains_point(p)));
        for p in candidates {
            if !points.contains(&p) {
                points.push(p);
            }
        }
        points
    }

    /// Splits the segment at each given point, returning the chain of
    /// sub-segments ordered from `first` to `second`.
    ///
    /// Endpoints and repeated points are ignored; with no qualifying point the
    /// segment itself is returned.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::PointNotOnSegment` if a point is off the segment.
    pub fn split_at(&self, points: &[Point]) -> Result<Vec<LineSegment>> {
        if let Some(p) = points
            .iter()
            .find(|p| !self.has_endpoint(p) && !self.touches_point(p))
        {
            return Err(GeometryError::PointNotOnSegment { x: p.x, y: p.y }.into());
        }
        Ok(self.split_at_interior(points))
    }

    /// Like [`split_at`](Self::split_at), but silently skips points that are
    /// not strictly inside the segment.
    pub(crate) fn split_at_interior(&self, points: &[Point]) -> Vec<LineSegment> {
        let mut cuts: Vec<(f64, Point)> = points
            .iter()
            .filter(|p| self.contains_point(p))
            .map(|p| (self.param_of(p), *p))
            .collect();
        if cuts.is_empty() {
            return vec![*self];
        }
        cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
        cuts.dedup_by(|a, b| a.1 == b.1);

        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut start = self.first;
        for (_, cut) in cuts {
            pieces.push(Self::ordered(start, cut));
            start = cut;
        }
        pieces.push(Self::ordered(start, self.second));
        pieces
    }
}

impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl std::fmt::Display for LineSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {}]", self.first, self.second)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::from_coords(x1, y1, x2, y2).unwrap()
    }

    #[test]
    fn constructor_rejects_equal_points() {
        let p1 = Point::new(1.0, -2.0);
        assert!(LineSegment::new(p1, Point::new(1.0, -2.0)).is_err());
        assert!(LineSegment::new(p1, Point::new(2.0, -1.0)).is_ok());
    }

    #[test]
    fn endpoints_are_canonically_ordered() {
        let s = seg(2.0, 0.0, 0.0, 5.0);
        assert_eq!(s.first(), Point::new(0.0, 5.0));
        assert_eq!(s.second(), Point::new(2.0, 0.0));
        assert_eq!(s, seg(0.0, 5.0, 2.0, 0.0));

        let vertical = seg(1.0, 3.0, 1.0, -1.0);
        assert_eq!(vertical.first(), Point::new(1.0, -1.0));
    }

    #[test]
    fn intersect_crossing() {
        let a = seg(0.0, 0.0, 2.0, 2.0);
        let b = seg(0.0, 2.0, 2.0, 0.0);
        assert_eq!(a.intersect(&b), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn intersect_t_junction_returns_stem_end() {
        let bar = seg(0.0, 0.0, 4.0, 0.0);
        let stem = seg(1.0, 0.0, 1.0, 3.0);
        assert_eq!(bar.intersect(&stem), Some(Point::new(1.0, 0.0)));
        assert_eq!(stem.intersect(&bar), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn intersect_ignores_shared_endpoint_and_parallel() {
        let a = seg(0.0, 0.0, 2.0, 0.0);
        assert_eq!(a.intersect(&seg(2.0, 0.0, 2.0, 2.0)), None);
        assert_eq!(a.intersect(&seg(0.0, 1.0, 2.0, 1.0)), None);
        assert_eq!(a.intersect(&seg(1.0, 0.0, 3.0, 0.0)), None);
        assert_eq!(a.intersect(&seg(3.0, -1.0, 3.0, 1.0)), None);
    }

    #[test]
    fn overlaps_requires_positive_length() {
        let a = seg(0.0, 0.0, 2.0, 0.0);
        assert!(a.overlaps(&seg(1.0, 0.0, 3.0, 0.0)));
        assert!(a.overlaps(&seg(0.5, 0.0, 1.5, 0.0)));
        assert!(a.overlaps(&a));
        assert!(!a.overlaps(&seg(2.0, 0.0, 3.0, 0.0)));
        assert!(!a.overlaps(&seg(0.0, 1.0, 2.0, 1.0)));
        assert!(!a.overlaps(&seg(1.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn split_points_for_partial_overlap() {
        let a = seg(0.0, 0.0, 2.0, 0.0);
        let b = seg(1.0, 0.0, 3.0, 0.0);
        let points = LineSegment::points_to_split_if_overlap(&a, &b);
        assert_eq!(points.len(), 2);
        assert!(points.contains(&Point::new(1.0, 0.0)));
        assert!(points.contains(&Point::new(2.0, 0.0)));

        let disjoint = seg(5.0, 0.0, 6.0, 0.0);
        assert!(LineSegment::points_to_split_if_overlap(&a, &disjoint).is_empty());
    }

    #[test]
    fn split_at_orders_and_dedups() {
        let s = seg(0.0, 0.0, 4.0, 0.0);
        let pieces = s
            .split_at(&[
                Point::new(3.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(3.0, 0.0),
                Point::new(0.0, 0.0),
            ])
            .unwrap();
        assert_eq!(
            pieces,
            vec![seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 3.0, 0.0), seg(3.0, 0.0, 4.0, 0.0)]
        );
    }

    #[test]
    fn split_at_follows_descending_direction() {
        let s = seg(0.0, 4.0, 2.0, 0.0);
        let pieces = s.split_at(&[Point::new(1.0, 2.0)]).unwrap();
        assert_eq!(pieces, vec![seg(0.0, 4.0, 1.0, 2.0), seg(1.0, 2.0, 2.0, 0.0)]);
    }

    #[test]
    fn split_at_without_points_returns_self() {
        let s = seg(0.0, 0.0, 1.0, 1.0);
        assert_eq!(s.split_at(&[]).unwrap(), vec![s]);
    }

    #[test]
    fn split_at_rejects_off_segment_point() {
        let s = seg(0.0, 0.0, 4.0, 0.0);
        assert!(s.split_at(&[Point::new(1.0, 1.0)]).is_err());
    }

    #[test]
    fn contains_point_excludes_endpoints() {
        let s = seg(0.0, 0.0, 2.0, 2.0);
        assert!(s.contains_point(&Point::new(1.0, 1.0)));
        assert!(!s.contains_point(&Point::new(0.0, 0.0)));
        assert!(!s.contains_point(&Point::new(3.0, 3.0)));
        assert!(s.touches_point(&Point::new(2.0, 2.0)));
    }

    #[test]
    fn shared_and_other_endpoint() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(1.0, 0.0, 1.0, 1.0);
        assert_eq!(a.shared_endpoint(&b), Some(Point::new(1.0, 0.0)));
        assert_eq!(a.shared_endpoint(&a), None);
        assert!(a.shares_endpoint(&b));
        assert!(!a.shares_endpoint(&LineSegment::from_coords(5.0, 5.0, 6.0, 6.0).unwrap()));
        assert_eq!(b.other_endpoint(&Point::new(1.0, 0.0)), Some(Point::new(1.0, 1.0)));
        assert_eq!(b.other_endpoint(&Point::new(5.0, 0.0)), None);
    }
}
