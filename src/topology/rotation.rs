//! Rotation system over a segment pool.
//!
//! At any vertex the segments meeting there are totally ordered by the
//! clockwise sweep from a reference segment. Boundary tracing picks the
//! next segment from that order.

use crate::error::{GeometryError, Result};
use crate::geometry::{LineSegment, Point};
use crate::math::normalize_angle;

/// One of the two canonical endpoints of a [`LineSegment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    First,
    Second,
}

impl Endpoint {
    /// Returns this endpoint of `segment`.
    #[must_use]
    pub fn of(self, segment: &LineSegment) -> Point {
        match self {
            Self::First => segment.first(),
            Self::Second => segment.second(),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Clockwise sweep in `[0, 2pi)` from ray `shared -> start` to ray
/// `shared -> end`.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateSegment` if `start` or `end`
/// coincides with `shared`.
pub fn angle_among_points(start: &Point, shared: &Point, end: &Point) -> Result<f64> {
    let from = shared.angle_towards(start)?;
    let to = shared.angle_towards(end)?;
    Ok(normalize_angle(from - to))
}

/// Clockwise sweep from `from`'s free ray to `to`'s free ray around their
/// shared endpoint. A segment compared with itself yields `0`.
///
/// # Errors
///
/// Returns `GeometryError::NotConnected` if the segments share no endpoint.
pub fn angle_clockwise(from: &LineSegment, to: &LineSegment) -> Result<f64> {
    if from == to {
        return Ok(0.0);
    }
    let shared = from
        .shared_endpoint(to)
        .ok_or(GeometryError::NotConnected)?;
    let start = from
        .other_endpoint(&shared)
        .ok_or(GeometryError::NotConnected)?;
    let end = to
        .other_endpoint(&shared)
        .ok_or(GeometryError::NotConnected)?;
    angle_among_points(&start, &shared, &end)
}

fn sweep(vertex: &Point, from: &Point, to: &Point) -> f64 {
    let a = (from.y - vertex.y).atan2(from.x - vertex.x);
    let b = (to.y - vertex.y).atan2(to.x - vertex.x);
    normalize_angle(a - b)
}

/// Segments of `pool` other than `segment` that touch `vertex`, sorted
/// ascending by clockwise sweep from `segment`.
///
/// `vertex` is expected to be an endpoint of `segment`; otherwise the
/// result is empty.
#[must_use]
pub fn neighbors_at(segment: &LineSegment, vertex: &Point, pool: &[LineSegment]) -> Vec<LineSegment> {
    let Some(from) = segment.other_endpoint(vertex) else {
        return Vec::new();
    };
    let mut keyed: Vec<(f64, LineSegment)> = pool
        .iter()
        .filter(|s| *s != segment)
        .filter_map(|s| s.other_endpoint(vertex).map(|to| (sweep(vertex, &from, &to), *s)))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, s)| s).collect()
}

/// Neighbors at the segment's first endpoint. See [`neighbors_at`].
#[must_use]
pub fn neighbors_at_start(segment: &LineSegment, pool: &[LineSegment]) -> Vec<LineSegment> {
    neighbors_at(segment, &segment.first(), pool)
}

/// Neighbors at the segment's second endpoint. See [`neighbors_at`].
#[must_use]
pub fn neighbors_at_end(segment: &LineSegment, pool: &[LineSegment]) -> Vec<LineSegment> {
    neighbors_at(segment, &segment.second(), pool)
}

fn has_neighbor(segment: &LineSegment, vertex: &Point, pool: &[LineSegment]) -> bool {
    pool.iter()
        .any(|s| s != segment && s.has_endpoint(vertex))
}

/// Removes segments with a free endpoint until none remain.
///
/// Copies of a segment do not count as its neighbors, so a duplicated
/// spur is pruned as well.
#[must_use]
pub fn prune_dangling(segments: &[LineSegment]) -> Vec<LineSegment> {
    let mut current = segments.to_vec();
    loop {
        let kept: Vec<LineSegment> = current
            .iter()
            .filter(|s| {
                has_neighbor(s, &s.first(), &current) && has_neighbor(s, &s.second(), &current)
            })
            .copied()
            .collect();
        if kept.len() == current.len() {
            return kept;
        }
        current = kept;
    }
}
