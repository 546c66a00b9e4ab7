//! stixcarve: closed-region geometry for a Qix-style arena game.
//!
//! A player draws orthogonal paths across an open rectangular arena to
//! carve off regions, shrinking the area the adversary roams in. This
//! crate is the geometry engine behind that: it maintains the mutable
//! open-region boundary, detects how a finished trail closes a loop
//! against it, splits the region into two complementary polygons,
//! decides which half stays open (it contains the adversary), and
//! computes the claimed area for scoring. Rendering, input, timing and
//! the adversary's movement live with the caller.
//!
//! # Example
//!
//! ```
//! use stixcarve::{ArenaConfig, Field, Point, Polyline};
//!
//! let config = ArenaConfig { width: 40, height: 50, left_margin: 0,
//!     right_margin: 0, top_margin: 0, bottom_margin: 0 };
//! let mut field = Field::new(&config)?;
//!
//! // The player cut a notch out of the left wall; the adversary is
//! // elsewhere, so the notch is claimed.
//! let trail = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (0, 30)]);
//! let claim = field.close(&trail, Point::new(30, 40))?;
//! assert_eq!(claim.area, 200);
//! # Ok::<(), stixcarve::GeomError>(())
//! ```
//!
//! Coordinates are screen pixels: integers, x growing right, y growing
//! **down**. All operations are synchronous, single-threaded and eager.

#![forbid(unsafe_code)]

mod closure;
mod config;
mod field;
mod geom;
mod linestore;
mod polyline;

pub mod error;

// Re-export kurbo so downstream users get the same version used for
// float intersection points.
pub use kurbo;

pub use closure::find_path;
pub use config::ArenaConfig;
pub use error::GeomError;
pub use field::{Claim, Field};
pub use geom::{
    intersect_segments, lines_with_point, orientation, point_is_on_line, split_line_at_point,
    Axis, Point, Segment, SegmentIntersection, Turn,
};
pub use linestore::{decompose, line_intersect, Hit, LineStore};
pub use polyline::{ClosedPolyline, Polyline};
