pub mod arrangement;
pub mod cycle;
pub mod fragment;
pub mod rotation;
pub mod traverse;

pub use arrangement::Arrangement;
pub use cycle::Cycle;
pub use fragment::{Fragment, FragmentState};
pub use rotation::{
    angle_among_points, angle_clockwise, neighbors_at, neighbors_at_end, neighbors_at_start,
    prune_dangling, Endpoint,
};
pub use traverse::{Traversal, TraversalPath, Traverser, TurnPolicy};
