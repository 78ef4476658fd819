pub mod point;
pub mod polyline;
pub mod segment;

pub use point::Point;
pub use polyline::Polyline;
pub use segment::LineSegment;
