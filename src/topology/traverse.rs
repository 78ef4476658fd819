use tracing::trace;

use crate::geometry::{LineSegment, Point};

use super::rotation::{neighbors_at, Endpoint};

/// Which neighbor the traverser takes at each vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPolicy {
    /// Smallest clockwise sweep from the incoming segment. Walks the
    /// outside of a face, keeping it on the right.
    SmallestAngle,
    /// Largest clockwise sweep from the incoming segment.
    #[default]
    LargestAngle,
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// The last vertex repeats the vertex at `loop_start`; the segments
    /// from `loop_start` on form a closed loop.
    ClosedLoop { loop_start: usize },
    /// The last vertex has no segment to continue with.
    DeadEnd,
}

/// A recorded walk: `segments[i]` joins `points[i]` and `points[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalPath {
    pub segments: Vec<LineSegment>,
    pub points: Vec<Point>,
    pub outcome: Traversal,
}

impl TraversalPath {
    /// The closed loop at the end of the walk, if it closed.
    #[must_use]
    pub fn loop_segments(&self) -> Option<&[LineSegment]> {
        match self.outcome {
            Traversal::ClosedLoop { loop_start } => Some(&self.segments[loop_start..]),
            Traversal::DeadEnd => None,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.outcome, Traversal::ClosedLoop { .. })
    }
}

/// Walks a fixed segment pool one turn at a time.
///
/// Every walk is recorded, so [`traverse_again`](Self::traverse_again) can
/// resume a depth-first search over the branches the earlier walks skipped.
/// The pool is never modified.
#[derive(Debug)]
pub struct Traverser<'a> {
    pool: &'a [LineSegment],
    policy: TurnPolicy,
    records: Vec<TraversalPath>,
}

impl<'a> Traverser<'a> {
    #[must_use]
    pub fn new(pool: &'a [LineSegment], policy: TurnPolicy) -> Self {
        Self {
            pool,
            policy,
            records: Vec::new(),
        }
    }

    /// Walks from `start`, leaving through its `active` endpoint, until the
    /// walk closes a loop or runs out of segments.
    pub fn traverse(&mut self, start: LineSegment, active: Endpoint) -> TraversalPath {
        self.records.clear();
        let segments = vec![start];
        let points = vec![active.opposite().of(&start), active.of(&start)];
        self.walk(segments, points)
    }

    /// Explores the next untried branch, backing up from the end of the
    /// latest walk. Returns `None` once every branch reachable from the
    /// start segment has been walked.
    pub fn traverse_again(&mut self) -> Option<TraversalPath> {
        let last = self.records.last()?.clone();
        for seg_idx in (0..last.segments.len().saturating_sub(1)).rev() {
            let incoming = last.segments[seg_idx];
            let junction = last.points[seg_idx + 1];
            let prefix = &last.segments[..=seg_idx];

            let mut branches = neighbors_at(&incoming, &junction, self.pool);
            if self.policy == TurnPolicy::LargestAngle {
                branches.reverse();
            }
            let untried = branches.into_iter().find(|b| {
                !self.records.iter().any(|r| {
                    r.segments.len() > seg_idx + 1
                        && r.segments[..=seg_idx] == *prefix
                        && r.segments[seg_idx + 1] == *b
                })
            });
            let Some(branch) = untried else {
                continue;
            };
            let Some(far) = branch.other_endpoint(&junction) else {
                continue;
            };

            trace!(backtrack_to = seg_idx, "resuming traversal on untried branch");
            let mut segments = prefix.to_vec();
            segments.push(branch);
            let mut points = last.points[..=seg_idx + 1].to_vec();
            points.push(far);
            return Some(self.walk(segments, points));
        }
        None
    }

    /// All walks since the last [`traverse`](Self::traverse), oldest first.
    #[must_use]
    pub fn records(&self) -> &[TraversalPath] {
        &self.records
    }

    fn walk(&mut self, mut segments: Vec<LineSegment>, mut points: Vec<Point>) -> TraversalPath {
        let outcome = loop {
            let (current, earlier) = match points.split_last() {
                Some(split) => split,
                None => break Traversal::DeadEnd,
            };
            if let Some(loop_start) = earlier.iter().position(|p| p == current) {
                break Traversal::ClosedLoop { loop_start };
            }
            let current = *current;
            let Some(incoming) = segments.last().copied() else {
                break Traversal::DeadEnd;
            };

            let neighbors = neighbors_at(&incoming, &current, self.pool);
            let next = match self.policy {
                TurnPolicy::SmallestAngle => neighbors.first(),
                TurnPolicy::LargestAngle => neighbors.last(),
            };
            let Some((next, far)) = next.and_then(|n| n.other_endpoint(&current).map(|f| (*n, f)))
            else {
                break Traversal::DeadEnd;
            };
            segments.push(next);
            points.push(far);
        };

        let path = TraversalPath {
            segments,
            points,
            outcome,
        };
        self.records.push(path.clone());
        path
    }
}
