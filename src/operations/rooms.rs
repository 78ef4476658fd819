use crate::geometry::Point;
use crate::math::polygon_2d::{chain_length, rotate_to_canonical_start, signed_area_2d};
use crate::topology::{Cycle, Fragment};

/// A finished room as handed to the layout layer.
///
/// Each loop is closed: its first point is repeated at the end, and it
/// starts at the leftmost-bottom vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub outer: Vec<Point>,
    pub inner: Vec<Vec<Point>>,
}

impl Room {
    /// Floor area: outer area minus holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.outer).abs()
            - self
                .inner
                .iter()
                .map(|hole| signed_area_2d(hole).abs())
                .sum::<f64>()
    }

    /// Length of the outer boundary.
    #[must_use]
    pub fn perimeter_length(&self) -> f64 {
        chain_length(&self.outer, false)
    }
}

impl From<&Fragment> for Room {
    fn from(fragment: &Fragment) -> Self {
        Self {
            outer: closed_loop(fragment.outer_perimeter()),
            inner: fragment.inner_perimeters().iter().map(closed_loop).collect(),
        }
    }
}

fn closed_loop(cycle: &Cycle) -> Vec<Point> {
    let mut points = rotate_to_canonical_start(cycle.vertices());
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

/// Converts undividable fragments into rooms, largest first.
#[derive(Debug)]
pub struct AssembleRooms {
    fragments: Vec<Fragment>,
    min_area: f64,
}

impl AssembleRooms {
    #[must_use]
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            fragments,
            min_area: 0.0,
        }
    }

    /// Drops rooms whose area is below `min_area`.
    #[must_use]
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    #[must_use]
    pub fn execute(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self
            .fragments
            .iter()
            .map(Room::from)
            .filter(|room| room.area() >= self.min_area)
            .collect();
        rooms.sort_by(|a, b| b.area().total_cmp(&a.area()));
        rooms
    }
}
