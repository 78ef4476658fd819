use crate::error::{Result, TopologyError};
use crate::geometry::{LineSegment, Point};

use super::Cycle;

/// Whether a fragment still has walls to split it along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentState {
    /// Interior segments remain and no holes have been assigned yet.
    Dividable,
    /// Final room, possibly with holes.
    Undividable,
}

/// A face of the arrangement: an outer boundary, its holes and the wall
/// segments lying inside it.
#[derive(Debug, Clone)]
pub struct Fragment {
    outer: Cycle,
    inner: Vec<Cycle>,
    interior: Vec<LineSegment>,
    state: FragmentState,
}

impl Fragment {
    /// Creates a fragment without holes. It is dividable when `interior`
    /// is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidFragment` if an interior segment is not
    /// inside `outer` or runs along it.
    pub fn new(outer: Cycle, interior: Vec<LineSegment>) -> Result<Self> {
        check_inside(&outer, &interior)?;
        let state = if interior.is_empty() {
            FragmentState::Undividable
        } else {
            FragmentState::Dividable
        };
        Ok(Self {
            outer,
            inner: Vec::new(),
            interior,
            state,
        })
    }

    /// Creates a final room with holes. `leftover` holds interior walls that
    /// belong to no face, such as bridges between a hole and the boundary.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidFragment` if a hole or leftover segment
    /// is not inside `outer`, if two holes overlap or nest, or if a leftover
    /// segment runs along a hole.
    pub fn undividable(outer: Cycle, holes: Vec<Cycle>, leftover: Vec<LineSegment>) -> Result<Self> {
        for hole in &holes {
            check_inside(&outer, hole.segments())?;
        }
        for (i, a) in holes.iter().enumerate() {
            for b in &holes[i + 1..] {
                if holes_clash(a, b) {
                    return Err(TopologyError::InvalidFragment(
                        "inner perimeters overlap or nest".to_owned(),
                    )
                    .into());
                }
            }
        }
        check_inside(&outer, &leftover)?;
        if let Some(s) = leftover.iter().find(|s| on_any_hole(&holes, s)) {
            return Err(TopologyError::InvalidFragment(format!(
                "segment {s} runs along an inner perimeter"
            ))
            .into());
        }
        Ok(Self {
            outer,
            inner: holes,
            interior: leftover,
            state: FragmentState::Undividable,
        })
    }

    #[must_use]
    pub fn outer_perimeter(&self) -> &Cycle {
        &self.outer
    }

    #[must_use]
    pub fn inner_perimeters(&self) -> &[Cycle] {
        &self.inner
    }

    #[must_use]
    pub fn interior_segments(&self) -> &[LineSegment] {
        &self.interior
    }

    #[must_use]
    pub fn state(&self) -> FragmentState {
        self.state
    }

    #[must_use]
    pub fn is_dividable(&self) -> bool {
        self.state == FragmentState::Dividable
    }

    /// Whether `seg` lies in the room: inside the outer boundary and not
    /// inside any hole.
    #[must_use]
    pub fn contains_segment(&self, seg: &LineSegment) -> bool {
        self.outer.contains_segment(seg) && !self.inner.iter().any(|h| h.contains_segment(seg))
    }

    #[must_use]
    pub fn is_perimeter_vertex(&self, p: &Point) -> bool {
        self.outer.has_vertex(p)
    }

    /// Outer area minus the area of every hole.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.outer.area() - self.inner.iter().map(Cycle::area).sum::<f64>()
    }

    /// Closed outer point loop.
    #[must_use]
    pub fn outer_points(&self) -> Vec<Point> {
        self.outer.points()
    }

    /// Closed point loop of each hole.
    #[must_use]
    pub fn inner_points(&self) -> Vec<Vec<Point>> {
        self.inner.iter().map(Cycle::points).collect()
    }

    #[must_use]
    pub fn into_parts(self) -> (Cycle, Vec<Cycle>, Vec<LineSegment>) {
        (self.outer, self.inner, self.interior)
    }
}

fn check_inside(outer: &Cycle, segments: &[LineSegment]) -> Result<()> {
    match segments.iter().find(|s| !outer.contains_segment(s)) {
        Some(s) => Err(TopologyError::InvalidFragment(format!(
            "segment {s} is not inside the outer perimeter"
        ))
        .into()),
        None => Ok(()),
    }
}

fn on_any_hole(holes: &[Cycle], seg: &LineSegment) -> bool {
    holes
        .iter()
        .flat_map(Cycle::segments)
        .any(|edge| edge == seg || edge.overlaps(seg))
}

fn holes_clash(a: &Cycle, b: &Cycle) -> bool {
    let overlapping = a
        .segments()
        .iter()
        .any(|s| b.segments().iter().any(|t| s.overlaps(t) || s.intersect(t).is_some()));
    overlapping
        || a.vertices().iter().any(|p| b.contains_point_strictly(p))
        || b.vertices().iter().any(|p| a.contains_point_strictly(p))
}
