mod divide;

use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::geometry::{LineSegment, Point};
use crate::math::TOLERANCE;
use crate::topology::{
    angle_among_points, prune_dangling, Arrangement, Cycle, Endpoint, Fragment, Traverser,
    TurnPolicy,
};

use divide::{divide, Division};

/// Extracts the rooms bounded by the walls of an [`Arrangement`].
///
/// Top-level extraction peels outer boundaries off the arrangement one at
/// a time. Full extraction then keeps dividing every fragment that still
/// has walls inside until only undividable fragments remain.
#[derive(Debug, Clone)]
pub struct ExtractFragments {
    arrangement: Arrangement,
    division_policy: TurnPolicy,
}

impl ExtractFragments {
    #[must_use]
    pub fn new(arrangement: Arrangement) -> Self {
        Self {
            arrangement,
            division_policy: TurnPolicy::default(),
        }
    }

    /// Sets the turn policy used when probing interiors for dividing paths.
    #[must_use]
    pub fn with_division_policy(mut self, policy: TurnPolicy) -> Self {
        self.division_policy = policy;
        self
    }

    /// Returns the top-level fragments without dividing them.
    ///
    /// # Errors
    ///
    /// Returns an error if a traced boundary does not form a valid cycle.
    pub fn top_level(&self) -> Result<Vec<Fragment>> {
        make_fragments(self.arrangement.segments())
    }

    /// Returns every undividable fragment.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::UnresolvableInterior` if interior walls can
    /// be neither joined to a perimeter nor closed into a hole, or
    /// `TopologyError::InvalidCycle` if a traced boundary is not simple.
    pub fn execute(&self) -> Result<Vec<Fragment>> {
        let mut stack = self.top_level()?;
        stack.reverse();
        let mut rooms = Vec::new();

        while let Some(fragment) = stack.pop() {
            if !fragment.is_dividable() {
                rooms.push(fragment);
                continue;
            }
            match divide(fragment, self.division_policy)? {
                Division::Split(a, b) => {
                    stack.push(b);
                    stack.push(a);
                }
                Division::Islands { parent, islands } => {
                    rooms.push(parent);
                    stack.extend(islands);
                }
            }
        }

        debug!(rooms = rooms.len(), "extraction finished");
        Ok(rooms)
    }
}

/// Top-level fragments of an arrangement: each outer boundary with the
/// walls inside it.
///
/// # Errors
///
/// See [`ExtractFragments::top_level`].
pub fn extract_top_level_fragments(arrangement: &Arrangement) -> Result<Vec<Fragment>> {
    make_fragments(arrangement.segments())
}

/// All undividable fragments of an arrangement.
///
/// # Errors
///
/// See [`ExtractFragments::execute`].
pub fn extract_all_fragments(arrangement: &Arrangement) -> Result<Vec<Fragment>> {
    ExtractFragments::new(arrangement.clone()).execute()
}

/// Peels outer loops off `segments` until nothing but dangling walls is left.
fn make_fragments(segments: &[LineSegment]) -> Result<Vec<Fragment>> {
    let mut remaining = prune_dangling(segments);
    let mut fragments = Vec::new();

    while !remaining.is_empty() {
        let boundary = trace_outer_loop(&remaining)?;
        let (inside, outside): (Vec<LineSegment>, Vec<LineSegment>) = remaining
            .into_iter()
            .filter(|s| !boundary.has_segment(s))
            .partition(|s| boundary.contains_segment(s));
        trace!(
            boundary = boundary.len(),
            inside = inside.len(),
            "traced outer loop"
        );
        fragments.push(Fragment::new(boundary, inside)?);
        remaining = prune_dangling(&outside);
    }

    Ok(fragments)
}

/// Traces the loop reached from the steepest upward segment at the
/// leftmost vertex, turning by the smallest angle at every vertex.
fn trace_outer_loop(segments: &[LineSegment]) -> Result<Cycle> {
    let start = leftmost_start(segments)?;
    let mut traverser = Traverser::new(segments, TurnPolicy::SmallestAngle);
    let path = traverser.traverse(start, Endpoint::Second);
    let Some(boundary) = path.loop_segments() else {
        return Err(OperationError::Failed(format!(
            "walk from {start} ended without closing a loop"
        ))
        .into());
    };
    Cycle::new(boundary)
}

/// Among segments starting at the minimum x, picks the one with the
/// smallest clockwise sweep from a point straight below. Ties keep the
/// earliest segment.
fn leftmost_start(segments: &[LineSegment]) -> Result<LineSegment> {
    let min_x = segments
        .iter()
        .map(|s| s.first().x)
        .fold(f64::INFINITY, f64::min);

    let mut best: Option<(f64, LineSegment)> = None;
    for s in segments.iter().filter(|s| (s.first().x - min_x).abs() <= TOLERANCE) {
        let p = s.first();
        let below = Point::new(p.x, p.y - 10.0);
        let angle = angle_among_points(&below, &p, &s.second())?;
        match best {
            Some((a, _)) if angle >= a => {}
            _ => best = Some((angle, *s)),
        }
    }
    match best {
        Some((_, s)) => Ok(s),
        None => Err(OperationError::Failed("no segment to start a boundary from".to_owned()).into()),
    }
}
