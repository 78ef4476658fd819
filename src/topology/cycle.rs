use crate::error::{CycleDefect, Result, RoomtraceError, TopologyError};
use crate::geometry::{LineSegment, Point};
use crate::math::polygon_2d::{chain_length, signed_area_2d};

use super::rotation::{prune_dangling, Endpoint};
use super::traverse::{Traversal, Traverser, TurnPolicy};

/// A simple closed loop of segments: the boundary of one face.
///
/// Segments are stored in walking order, and `vertices[i]` is where
/// `segments[i]` starts.
#[derive(Debug, Clone)]
pub struct Cycle {
    segments: Vec<LineSegment>,
    vertices: Vec<Point>,
}

impl Cycle {
    /// Validates `segments` as a single simple loop and orders them.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidCycle` if there are fewer than three
    /// segments, a segment repeats, a segment dangles, a vertex joins more
    /// than two segments, or the segments form more than one loop.
    pub fn new(segments: &[LineSegment]) -> Result<Self> {
        let n = segments.len();
        if n < 3 {
            return Err(invalid(CycleDefect::TooFewSegments(n)));
        }
        for (i, s) in segments.iter().enumerate() {
            if segments[i + 1..].contains(s) {
                return Err(invalid(CycleDefect::DuplicateSegment));
            }
        }
        if prune_dangling(segments).len() != n {
            return Err(invalid(CycleDefect::DanglingSegment));
        }
        let branching = segments.iter().flat_map(LineSegment::endpoints).any(|p| {
            segments.iter().filter(|s| s.has_endpoint(&p)).count() != 2
        });
        if branching {
            return Err(invalid(CycleDefect::Branching));
        }

        let mut traverser = Traverser::new(segments, TurnPolicy::SmallestAngle);
        let path = traverser.traverse(segments[0], Endpoint::Second);
        if path.outcome != (Traversal::ClosedLoop { loop_start: 0 }) || path.segments.len() != n {
            return Err(invalid(CycleDefect::NotClosed));
        }

        let mut vertices = path.points;
        vertices.truncate(n);
        Ok(Self {
            segments: path.segments,
            vertices,
        })
    }

    #[must_use]
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Distinct vertices in walking order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Vertices in walking order with the first repeated at the end.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        let mut points = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            points.push(*first);
        }
        points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; a cycle has at least three segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn has_vertex(&self, p: &Point) -> bool {
        self.vertices.contains(p)
    }

    #[must_use]
    pub fn has_segment(&self, s: &LineSegment) -> bool {
        self.segments.contains(s)
    }

    /// Whether `p` lies on one of the cycle's segments.
    #[must_use]
    pub fn on_boundary(&self, p: &Point) -> bool {
        self.segments.iter().any(|s| s.touches_point(p))
    }

    /// Whether `p` is inside the loop or on its boundary.
    ///
    /// Off-boundary points use the even-odd rule on a ray towards `-x`,
    /// counting each edge over the half-open span `[min y, max y)`.
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.on_boundary(p) {
            return true;
        }
        let n = self.vertices.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x < p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Whether `p` is inside the loop and off its boundary.
    #[must_use]
    pub fn contains_point_strictly(&self, p: &Point) -> bool {
        !self.on_boundary(p) && self.contains_point(p)
    }

    /// Whether `seg` lies within the closed face without running along or
    /// across the boundary.
    #[must_use]
    pub fn contains_segment(&self, seg: &LineSegment) -> bool {
        let crosses = self.segments.iter().any(|edge| {
            edge.overlaps(seg)
                || edge
                    .intersect(seg)
                    .is_some_and(|hit| !seg.has_endpoint(&hit))
        });
        !crosses
            && self.contains_point(&seg.first())
            && self.contains_point(&seg.second())
            && self.contains_point(&seg.midpoint())
    }

    /// Shoelace area: positive when the loop runs counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Total boundary length.
    #[must_use]
    pub fn length(&self) -> f64 {
        chain_length(&self.vertices, true)
    }
}

fn invalid(defect: CycleDefect) -> RoomtraceError {
    TopologyError::InvalidCycle(defect).into()
}

impl PartialEq for Cycle {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.segments.iter().all(|s| other.has_segment(s))
    }
}
