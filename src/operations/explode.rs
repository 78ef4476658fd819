use tracing::debug;

use crate::error::Result;
use crate::geometry::{LineSegment, Point, Polyline};
use crate::topology::Arrangement;

/// Builds a planar [`Arrangement`] from raw wall segments.
///
/// Input may contain duplicates, collinear overlaps and crossings. Overlaps
/// are resolved first: splitting overlapping walls can expose pairs that
/// would otherwise look like crossings.
#[derive(Debug, Clone)]
pub struct Explode {
    segments: Vec<LineSegment>,
}

impl Explode {
    #[must_use]
    pub fn new(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }

    /// Flattens drawn wall polylines into the segment input.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegeneratePolyline` if a polyline yields no
    /// segment of positive length.
    pub fn from_polylines(polylines: &[Polyline]) -> Result<Self> {
        let mut segments = Vec::new();
        for polyline in polylines {
            segments.extend(polyline.segments()?);
        }
        Ok(Self { segments })
    }

    /// Runs both passes and returns the arrangement.
    #[must_use]
    pub fn execute(&self) -> Arrangement {
        let collapsed = resolve_overlaps(&self.segments);
        let planar = resolve_crossings(&collapsed);
        debug!(
            input = self.segments.len(),
            collapsed = collapsed.len(),
            output = planar.len(),
            "exploded wall segments"
        );
        Arrangement::from_planar(planar)
    }
}

/// Splits every pair of overlapping segments at each other's endpoints and
/// drops the identical pieces this produces.
fn resolve_overlaps(segments: &[LineSegment]) -> Vec<LineSegment> {
    let mut cuts: Vec<Vec<Point>> = vec![Vec::new(); segments.len()];
    for (i, a) in segments.iter().enumerate() {
        for (j, b) in segments.iter().enumerate().skip(i + 1) {
            for p in LineSegment::points_to_split_if_overlap(a, b) {
                if a.contains_point(&p) {
                    cuts[i].push(p);
                }
                if b.contains_point(&p) {
                    cuts[j].push(p);
                }
            }
        }
    }
    dedup(split_all(segments, &cuts))
}

/// Splits every pair of crossing segments at the crossing point.
fn resolve_crossings(segments: &[LineSegment]) -> Vec<LineSegment> {
    let mut cuts: Vec<Vec<Point>> = vec![Vec::new(); segments.len()];
    let mut crossings = 0usize;
    for (i, a) in segments.iter().enumerate() {
        for (j, b) in segments.iter().enumerate().skip(i + 1) {
            let Some(p) = a.intersect(b) else {
                continue;
            };
            crossings += 1;
            if a.contains_point(&p) {
                cuts[i].push(p);
            }
            if b.contains_point(&p) {
                cuts[j].push(p);
            }
        }
    }
    if crossings > 0 {
        debug!(crossings, "split crossing segments");
    }
    dedup(split_all(segments, &cuts))
}

fn split_all(segments: &[LineSegment], cuts: &[Vec<Point>]) -> Vec<LineSegment> {
    segments
        .iter()
        .zip(cuts)
        .flat_map(|(s, c)| s.split_at_interior(c))
        .collect()
}

fn dedup(segments: Vec<LineSegment>) -> Vec<LineSegment> {
    let mut unique: Vec<LineSegment> = Vec::with_capacity(segments.len());
    for s in segments {
        if !unique.contains(&s) {
            unique.push(s);
        }
    }
    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::from_coords(x1, y1, x2, y2).unwrap()
    }

    fn explode(segments: Vec<LineSegment>) -> Arrangement {
        Explode::new(segments).execute()
    }

    fn assert_planar(arrangement: &Arrangement) {
        let segs = arrangement.segments();
        for (i, a) in segs.iter().enumerate() {
            for b in &segs[i + 1..] {
                assert!(!a.overlaps(b), "{a} overlaps {b}");
                assert_eq!(a.intersect(b), None, "{a} crosses {b}");
            }
        }
    }

    #[test]
    fn empty_input_gives_empty_arrangement() {
        assert!(explode(Vec::new()).is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let s = seg(0.0, 0.0, 1.0, 0.0);
        let result = explode(vec![s, seg(1.0, 0.0, 0.0, 0.0), s]);
        assert_eq!(result.segments(), &[s]);
    }

    #[test]
    fn partial_overlap_is_split_into_three() {
        let result = explode(vec![seg(0.0, 0.0, 2.0, 0.0), seg(1.0, 0.0, 3.0, 0.0)]);
        let expected = Arrangement::from_planar(vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 2.0, 0.0),
            seg(2.0, 0.0, 3.0, 0.0),
        ]);
        assert_eq!(result, expected);
    }

    #[test]
    fn contained_overlap_is_split() {
        let result = explode(vec![seg(0.0, 0.0, 4.0, 0.0), seg(1.0, 0.0, 2.0, 0.0)]);
        assert_eq!(result.len(), 3);
        assert_planar(&result);
    }

    #[test]
    fn crossing_becomes_a_shared_vertex() {
        let result = explode(vec![seg(0.0, 0.0, 2.0, 2.0), seg(0.0, 2.0, 2.0, 0.0)]);
        assert_eq!(result.len(), 4);
        assert!(result.segments().iter().all(|s| s.has_endpoint(&Point::new(1.0, 1.0))));
    }

    #[test]
    fn t_junction_splits_only_the_bar() {
        let result = explode(vec![seg(0.0, 0.0, 4.0, 0.0), seg(1.0, 0.0, 1.0, 3.0)]);
        let expected = Arrangement::from_planar(vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 4.0, 0.0),
            seg(1.0, 0.0, 1.0, 3.0),
        ]);
        assert_eq!(result, expected);
    }

    #[test]
    fn grid_is_planar_and_idempotent() {
        let input = vec![
            seg(0.0, 0.0, 6.0, 0.0),
            seg(0.0, 3.0, 6.0, 3.0),
            seg(0.0, 6.0, 6.0, 6.0),
            seg(0.0, 0.0, 0.0, 6.0),
            seg(3.0, -1.0, 3.0, 7.0),
            seg(6.0, 0.0, 6.0, 6.0),
            seg(2.0, 0.0, 4.0, 0.0),
            seg(0.0, 0.0, 6.0, 6.0),
        ];
        let once = explode(input);
        assert_planar(&once);
        let twice = explode(once.segments().to_vec());
        assert_eq!(once, twice);
    }

    #[test]
    fn from_polylines_flattens_and_explodes() {
        let square = Polyline::from_coords(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)], true);
        let divider = Polyline::from_coords(&[(1.0, -1.0), (1.0, 3.0)], false);
        let result = Explode::from_polylines(&[square, divider]).unwrap().execute();
        // Four edges, two of them split, plus the divider cut into three.
        assert_eq!(result.len(), 9);
        assert_planar(&result);
    }

    #[test]
    fn from_polylines_rejects_degenerate_input() {
        let dot = Polyline::from_coords(&[(1.0, 1.0)], false);
        assert!(Explode::from_polylines(&[dot]).is_err());
    }
}
