mod explode;
pub mod extract;
mod rooms;

pub use explode::Explode;
pub use extract::{extract_all_fragments, extract_top_level_fragments, ExtractFragments};
pub use rooms::{AssembleRooms, Room};

use crate::error::Result;
use crate::geometry::LineSegment;
use crate::topology::{Arrangement, Fragment};

/// Builds a planar arrangement from arbitrary wall segments.
#[must_use]
pub fn explode(segments: Vec<LineSegment>) -> Arrangement {
    Explode::new(segments).execute()
}

/// Extracts every undividable room from an arrangement.
///
/// # Errors
///
/// See [`ExtractFragments::execute`].
pub fn extract_rooms(arrangement: Arrangement) -> Result<Vec<Fragment>> {
    ExtractFragments::new(arrangement).execute()
}
