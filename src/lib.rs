pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, RoomtraceError};
pub use geometry::{LineSegment, Point, Polyline};
pub use operations::{
    explode, extract_all_fragments, extract_rooms, extract_top_level_fragments, AssembleRooms,
    Explode, ExtractFragments, Room,
};
pub use topology::{Arrangement, Cycle, Fragment, FragmentState, TurnPolicy};
