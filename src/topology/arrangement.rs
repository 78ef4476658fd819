use crate::geometry::{LineSegment, Point};

/// A planar set of wall segments.
///
/// No two segments overlap and no two segments cross away from a shared
/// endpoint. Arrangements are produced by [`Explode`](crate::operations::Explode);
/// segment order carries no meaning, so equality compares segment sets.
#[derive(Debug, Clone, Default)]
pub struct Arrangement {
    segments: Vec<LineSegment>,
}

impl Arrangement {
    /// Wraps segments already known to be planar.
    pub(crate) fn from_planar(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<LineSegment> {
        self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Distinct segment endpoints, in first-seen order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point> {
        let mut vertices: Vec<Point> = Vec::new();
        for p in self.segments.iter().flat_map(LineSegment::endpoints) {
            if !vertices.contains(&p) {
                vertices.push(p);
            }
        }
        vertices
    }

    /// Checks the planarity invariant pairwise.
    #[must_use]
    pub fn is_planar(&self) -> bool {
        self.segments.iter().enumerate().all(|(i, a)| {
            self.segments[i + 1..]
                .iter()
                .all(|b| a != b && !a.overlaps(b) && a.intersect(b).is_none())
        })
    }
}

impl PartialEq for Arrangement {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .segments
                .iter()
                .all(|s| other.segments.contains(s))
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
    fn equality_ignores_order_and_orientation() {
        let a = Arrangement::from_planar(vec![seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0)]);
        let b = Arrangement::from_planar(vec![seg(1.0, 1.0, 1.0, 0.0), seg(1.0, 0.0, 0.0, 0.0)]);
        assert_eq!(a, b);
        let c = Arrangement::from_planar(vec![seg(0.0, 0.0, 1.0, 0.0)]);
        assert_ne!(a, c);
    }

    #[test]
    fn vertices_are_distinct() {
        let a = Arrangement::from_planar(vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 0.0, 0.0),
        ]);
        assert_eq!(a.vertices().len(), 3);
        assert_eq!(a.len(), 3);
        assert!(Arrangement::default().is_empty());
    }

    #[test]
    fn planarity_check_detects_crossing() {
        let crossing = Arrangement::from_planar(vec![
            seg(0.0, 0.0, 2.0, 2.0),
            seg(0.0, 2.0, 2.0, 0.0),
        ]);
        assert!(!crossing.is_planar());
        let touching = Arrangement::from_planar(vec![
            seg(0.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 2.0, 0.0),
        ]);
        assert!(touching.is_planar());
    }
}
