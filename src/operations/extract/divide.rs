use tracing::{debug, trace};

use crate::error::{OperationError, Result};
use crate::geometry::{LineSegment, Point};
use crate::topology::{neighbors_at, Cycle, Fragment, TurnPolicy};

use super::make_fragments;

/// Outcome of dividing one dividable fragment.
#[derive(Debug)]
pub(super) enum Division {
    /// A path across the interior cut the fragment in two.
    Split(Fragment, Fragment),
    /// No path crosses the interior. The interior loops became holes of
    /// `parent`; loops that still enclose walls come back as `islands`.
    Islands {
        parent: Fragment,
        islands: Vec<Fragment>,
    },
}

/// A chain of interior segments joining two distinct perimeter vertices.
#[derive(Debug)]
struct DividingPath {
    segments: Vec<LineSegment>,
    from: Point,
    to: Point,
}

pub(super) fn divide(fragment: Fragment, policy: TurnPolicy) -> Result<Division> {
    let (outer, _, interior) = fragment.into_parts();

    let Some(path) = find_dividing_path(&outer, &interior, policy) else {
        return settle_islands(outer, &interior);
    };
    trace!(
        len = path.segments.len(),
        from = %path.from,
        to = %path.to,
        "dividing path found"
    );

    let (mut arc_a, mut arc_b) = split_perimeter(&outer, &path.from, &path.to)?;
    arc_a.extend_from_slice(&path.segments);
    arc_b.extend_from_slice(&path.segments);
    let cycle_a = Cycle::new(&arc_a)?;
    let cycle_b = Cycle::new(&arc_b)?;

    let mut inside_a = Vec::new();
    let mut inside_b = Vec::new();
    for s in interior.into_iter().filter(|s| !path.segments.contains(s)) {
        if cycle_a.contains_segment(&s) {
            inside_a.push(s);
        } else if cycle_b.contains_segment(&s) {
            inside_b.push(s);
        } else {
            return Err(OperationError::Failed(format!(
                "interior segment {s} left no side of the dividing path"
            ))
            .into());
        }
    }

    Ok(Division::Split(
        Fragment::new(cycle_a, inside_a)?,
        Fragment::new(cycle_b, inside_b)?,
    ))
}

/// Searches from every spur, depth first, for a chain of interior segments
/// reaching a second perimeter vertex.
///
/// Branches are tried in turn-policy order. A vertex is expanded at most
/// once per spur and the walk never continues through a perimeter vertex,
/// so each spur costs a single pass over the interior.
fn find_dividing_path(
    outer: &Cycle,
    interior: &[LineSegment],
    policy: TurnPolicy,
) -> Option<DividingPath> {
    interior.iter().find_map(|spur| {
        if outer.has_vertex(&spur.first()) {
            search_from_spur(outer, interior, policy, *spur, spur.first())
        } else if outer.has_vertex(&spur.second()) {
            search_from_spur(outer, interior, policy, *spur, spur.second())
        } else {
            None
        }
    })
}

/// One pending junction of the search: the segment that reached it and the
/// branches still to try, in reverse order.
struct Junction {
    incoming: LineSegment,
    vertex: Point,
    untried: Vec<LineSegment>,
}

fn search_from_spur(
    outer: &Cycle,
    interior: &[LineSegment],
    policy: TurnPolicy,
    spur: LineSegment,
    from: Point,
) -> Option<DividingPath> {
    let far = spur.other_endpoint(&from)?;
    if outer.has_vertex(&far) {
        return Some(DividingPath {
            segments: vec![spur],
            from,
            to: far,
        });
    }

    let branches = |incoming: &LineSegment, vertex: &Point| {
        let mut ordered = neighbors_at(incoming, vertex, interior);
        if policy == TurnPolicy::SmallestAngle {
            ordered.reverse();
        }
        ordered
    };

    let mut visited = vec![from, far];
    let mut stack = vec![Junction {
        incoming: spur,
        vertex: far,
        untried: branches(&spur, &far),
    }];
    while let Some(top) = stack.last_mut() {
        let Some(next) = top.untried.pop() else {
            stack.pop();
            continue;
        };
        let vertex = top.vertex;
        let Some(reached) = next.other_endpoint(&vertex) else {
            continue;
        };
        if visited.contains(&reached) {
            continue;
        }
        if outer.has_vertex(&reached) {
            let mut segments: Vec<LineSegment> = stack.iter().map(|j| j.incoming).collect();
            segments.push(next);
            return Some(DividingPath {
                segments,
                from,
                to: reached,
            });
        }
        visited.push(reached);
        stack.push(Junction {
            incoming: next,
            vertex: reached,
            untried: branches(&next, &reached),
        });
    }
    None
}

/// Splits the perimeter at two of its vertices into the two arcs joining
/// them.
fn split_perimeter(
    outer: &Cycle,
    a: &Point,
    b: &Point,
) -> Result<(Vec<LineSegment>, Vec<LineSegment>)> {
    let vertices = outer.vertices();
    let position = |p: &Point| {
        vertices
            .iter()
            .position(|v| v == p)
            .ok_or_else(|| OperationError::Failed(format!("{p} is not a perimeter vertex")))
    };
    let ia = position(a)?;
    let ib = position(b)?;
    let (lo, hi) = (ia.min(ib), ia.max(ib));

    let segments = outer.segments();
    let first = segments[lo..hi].to_vec();
    let mut second = segments[hi..].to_vec();
    second.extend_from_slice(&segments[..lo]);
    Ok((first, second))
}

/// Turns the loops of an interior that no path crosses into holes.
fn settle_islands(outer: Cycle, interior: &[LineSegment]) -> Result<Division> {
    let loops = make_fragments(interior)?;
    if loops.is_empty() {
        return Err(OperationError::UnresolvableInterior {
            remaining: interior.len(),
        }
        .into());
    }

    let mut holes = Vec::with_capacity(loops.len());
    let mut islands = Vec::new();
    for island in loops {
        holes.push(island.outer_perimeter().clone());
        if island.is_dividable() {
            islands.push(island);
        }
    }
    let leftover: Vec<LineSegment> = interior
        .iter()
        .filter(|s| !holes.iter().any(|h| h.has_segment(s) || h.contains_segment(s)))
        .copied()
        .collect();
    debug!(
        holes = holes.len(),
        islands = islands.len(),
        leftover = leftover.len(),
        "interior settled as holes"
    );

    Ok(Division::Islands {
        parent: Fragment::undividable(outer, holes, leftover)?,
        islands,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::from_coords(x1, y1, x2, y2).unwrap()
    }

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<LineSegment> {
        vec![
            seg(x0, y0, x1, y0),
            seg(x1, y0, x1, y1),
            seg(x1, y1, x0, y1),
            seg(x0, y1, x0, y0),
        ]
    }

    /// 4 x 2 box with vertices on the long sides at x = 2.
    fn split_box() -> Cycle {
        Cycle::new(&[
            seg(0.0, 0.0, 2.0, 0.0),
            seg(2.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 4.0, 2.0),
            seg(4.0, 2.0, 2.0, 2.0),
            seg(2.0, 2.0, 0.0, 2.0),
            seg(0.0, 2.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn split_perimeter_covers_every_edge_once() {
        let outer = split_box();
        let (a, b) = split_perimeter(&outer, &Point::new(2.0, 0.0), &Point::new(2.0, 2.0)).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
        for s in outer.segments() {
            assert!(a.contains(s) != b.contains(s));
        }
    }

    #[test]
    fn split_perimeter_rejects_foreign_point() {
        let outer = split_box();
        assert!(split_perimeter(&outer, &Point::new(1.0, 1.0), &Point::new(2.0, 2.0)).is_err());
    }

    #[test]
    fn bent_path_divides_the_box() {
        let interior = vec![seg(2.0, 0.0, 2.0, 1.0), seg(2.0, 1.0, 2.0, 2.0)];
        let fragment = Fragment::new(split_box(), interior).unwrap();
        let Division::Split(a, b) = divide(fragment, TurnPolicy::LargestAngle).unwrap() else {
            panic!("expected a split");
        };
        assert!(!a.is_dividable());
        assert!(!b.is_dividable());
        assert_eq!(a.outer_perimeter().len(), 5);
        assert_eq!(b.outer_perimeter().len(), 5);
        assert!((a.area() + b.area() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn path_avoids_dead_end_branch() {
        // The walk from (2, 0) meets a stub at (2, 1) before reaching (2, 2).
        let interior = vec![
            seg(2.0, 0.0, 2.0, 1.0),
            seg(2.0, 1.0, 3.0, 1.0),
            seg(2.0, 1.0, 2.0, 2.0),
        ];
        for policy in [TurnPolicy::SmallestAngle, TurnPolicy::LargestAngle] {
            let path = find_dividing_path(&split_box(), &interior, policy).unwrap();
            assert_eq!(path.segments.len(), 2);
            assert!(!path.segments.contains(&interior[1]));
        }
    }

    #[test]
    fn loop_back_to_the_spur_start_is_not_a_path() {
        let outer = Cycle::new(&rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let interior = vec![
            seg(0.0, 0.0, 3.0, 3.0),
            seg(3.0, 3.0, 5.0, 3.0),
            seg(5.0, 3.0, 0.0, 0.0),
        ];
        for policy in [TurnPolicy::SmallestAngle, TurnPolicy::LargestAngle] {
            assert!(find_dividing_path(&outer, &interior, policy).is_none());
        }
    }

    #[test]
    fn disjoint_loop_becomes_a_hole() {
        let outer = Cycle::new(&rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let interior = rectangle(3.0, 3.0, 6.0, 6.0);
        let fragment = Fragment::new(outer, interior).unwrap();
        let Division::Islands { parent, islands } = divide(fragment, TurnPolicy::LargestAngle).unwrap()
        else {
            panic!("expected islands");
        };
        assert!(islands.is_empty());
        assert_eq!(parent.inner_perimeters().len(), 1);
        assert!(parent.interior_segments().is_empty());
        assert!((parent.area() - 91.0).abs() < 1e-9);
    }

    #[test]
    fn bridged_island_keeps_its_bridge() {
        let outer = Cycle::new(&rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut interior = rectangle(3.0, 3.0, 6.0, 6.0);
        let bridge = seg(0.0, 10.0, 3.0, 6.0);
        interior.push(bridge);
        // The bridge meets the outer corner, so it is a spur with no way out.
        let fragment = Fragment::new(outer, interior).unwrap();
        let Division::Islands { parent, islands } = divide(fragment, TurnPolicy::LargestAngle).unwrap()
        else {
            panic!("expected islands");
        };
        assert!(islands.is_empty());
        assert_eq!(parent.inner_perimeters().len(), 1);
        assert_eq!(parent.interior_segments(), &[bridge]);
    }

    #[test]
    fn island_with_walls_is_returned_for_further_division() {
        let outer = Cycle::new(&rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut interior = vec![
            seg(3.0, 3.0, 5.0, 3.0),
            seg(5.0, 3.0, 7.0, 3.0),
            seg(7.0, 3.0, 7.0, 6.0),
            seg(7.0, 6.0, 5.0, 6.0),
            seg(5.0, 6.0, 3.0, 6.0),
            seg(3.0, 6.0, 3.0, 3.0),
        ];
        let wall = seg(5.0, 3.0, 5.0, 6.0);
        interior.push(wall);
        let fragment = Fragment::new(outer, interior).unwrap();
        let Division::Islands { parent, islands } = divide(fragment, TurnPolicy::LargestAngle).unwrap()
        else {
            panic!("expected islands");
        };
        assert_eq!(parent.inner_perimeters().len(), 1);
        assert_eq!(islands.len(), 1);
        assert_eq!(islands[0].interior_segments(), &[wall]);
    }

    #[test]
    fn loose_interior_is_unresolvable() {
        let outer = Cycle::new(&rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let interior = vec![seg(2.0, 2.0, 4.0, 4.0), seg(4.0, 4.0, 6.0, 2.0)];
        let fragment = Fragment::new(outer, interior).unwrap();
        assert!(matches!(
            divide(fragment, TurnPolicy::LargestAngle),
            Err(crate::error::RoomtraceError::Operation(
                OperationError::UnresolvableInterior { remaining: 2 }
            ))
        ));
    }
}
