use thiserror::Error;

/// Top-level error type for the room extraction engine.
#[derive(Debug, Error)]
pub enum RoomtraceError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by the geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate segment: both endpoints are ({x}, {y})")]
    DegenerateSegment { x: f64, y: f64 },

    #[error("point ({x}, {y}) does not lie on the segment")]
    PointNotOnSegment { x: f64, y: f64 },

    #[error("segments do not share an endpoint")]
    NotConnected,

    #[error("degenerate polyline: {0}")]
    DegeneratePolyline(String),
}

/// Reason a candidate loop was rejected as a [`Cycle`](crate::topology::Cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDefect {
    TooFewSegments(usize),
    DuplicateSegment,
    DanglingSegment,
    Branching,
    NotClosed,
}

impl std::fmt::Display for CycleDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewSegments(n) => write!(f, "{n} segments, at least 3 required"),
            Self::DuplicateSegment => f.write_str("duplicate segment"),
            Self::DanglingSegment => f.write_str("dangling segment"),
            Self::Branching => f.write_str("loop branches at a vertex"),
            Self::NotClosed => f.write_str("segments do not form one closed loop"),
        }
    }
}

/// Errors related to the planar structures built on top of segments.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("invalid cycle: {0}")]
    InvalidCycle(CycleDefect),

    #[error("invalid fragment: {0}")]
    InvalidFragment(String),
}

/// Errors raised by the extraction operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{remaining} interior segments cannot be reconciled with the perimeter")]
    UnresolvableInterior { remaining: usize },

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`RoomtraceError`].
pub type Result<T> = std::result::Result<T, RoomtraceError>;
