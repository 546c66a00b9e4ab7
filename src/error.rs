use thiserror::Error;

use crate::geom::{Point, Segment};

/// Errors that can occur in the geometry engine.
///
/// Every variant is a caller-input violation detected eagerly at the
/// offending call; there are no transient or retriable failures. A game
/// loop should treat any of these during trail processing as "this
/// closure attempt is invalid" and leave its state unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeomError {
    #[error("segment {0} is neither horizontal nor vertical")]
    Diagonal(Segment),

    #[error("segments {0} and {1} do not connect")]
    Disconnected(Segment, Segment),

    #[error("point {0} is not on path")]
    PointNotOnPath(Point),

    #[error("point {0} is not on segment {1}")]
    PointNotOnSegment(Point, Segment),

    #[error("point {0} is not a vertex of the path")]
    VertexNotFound(Point),

    #[error("replacement path runs in reverse direction")]
    ReverseDirection,

    #[error("a path needs at least two points, got {0}")]
    TooFewPoints(usize),

    #[error("no boundary path closes the loop")]
    NoClosingPath,
}
