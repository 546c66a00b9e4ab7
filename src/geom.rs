//! Shared geometry primitives.
//!
//! Exact integer points and axis-aligned segments in screen coordinates
//! (x grows right, y grows **down**), plus the handful of pure predicates
//! the boundary structures are built on: point-on-segment membership,
//! turn orientation at a shared vertex, segment splitting, and general
//! 2-D segment intersection (the one place floats enter the picture).

use std::fmt;

use crate::error::GeomError;

/// Cross products below this magnitude are treated as parallel.
const PARALLEL_EPS: f64 = 1e-9;

// ── Core types ───────────────────────────────────────────

/// A pixel position. Equality is exact (integer), never floating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Lift into float coordinates for the general intersection math.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A directed segment. "From A to B" is distinct from "from B to A";
/// the loop-closure walk relies on that.
///
/// Construction is unvalidated: the general intersection primitive
/// accepts diagonal segments, while the axis-aligned-only operations
/// reject them with [`GeomError::Diagonal`] at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Segment { start, end }
    }

    /// Horizontal when the y coordinates match (zero-length segments
    /// classify as horizontal), vertical when the x coordinates match,
    /// `None` for diagonals.
    pub fn axis(&self) -> Option<Axis> {
        if self.start.y == self.end.y {
            Some(Axis::Horizontal)
        } else if self.start.x == self.end.x {
            Some(Axis::Vertical)
        } else {
            None
        }
    }

    /// The same segment traversed the other way.
    pub fn reversed(self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Direction vector end − start, widened so cross products can't
    /// overflow.
    pub fn delta(&self) -> (i64, i64) {
        (
            self.end.x as i64 - self.start.x as i64,
            self.end.y as i64 - self.start.y as i64,
        )
    }

    /// Unit-step direction: each component collapsed to −1, 0 or +1.
    pub fn heading(&self) -> (i32, i32) {
        (
            (self.end.x - self.start.x).signum(),
            (self.end.y - self.start.y).signum(),
        )
    }
}

impl From<((i32, i32), (i32, i32))> for Segment {
    fn from((start, end): ((i32, i32), (i32, i32))) -> Self {
        Segment::new(start.into(), end.into())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Orientation tag for axis-aligned segments and [`LineStore`]s.
///
/// [`LineStore`]: crate::LineStore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The turn taken at a shared vertex, as seen on screen (y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Straight,
    Right,
}

// ── Predicates ───────────────────────────────────────────

/// True iff `point` lies on the axis-aligned segment `line`, endpoints
/// inclusive.
pub fn point_is_on_line(point: Point, line: Segment) -> Result<bool, GeomError> {
    match line.axis() {
        Some(Axis::Horizontal) => Ok(point.y == line.start.y
            && line.start.x.min(line.end.x) <= point.x
            && point.x <= line.start.x.max(line.end.x)),
        Some(Axis::Vertical) => Ok(point.x == line.start.x
            && line.start.y.min(line.end.y) <= point.y
            && point.y <= line.start.y.max(line.end.y)),
        None => Err(GeomError::Diagonal(line)),
    }
}

/// All segments of `lines` that contain `point`.
pub fn lines_with_point(lines: &[Segment], point: Point) -> Result<Vec<Segment>, GeomError> {
    let mut found = Vec::new();
    for &line in lines {
        if point_is_on_line(point, line)? {
            found.push(line);
        }
    }
    Ok(found)
}

/// Split `line` at `point`.
///
/// A point strictly inside the segment yields the two halves, **both
/// starting at the point**. A point equal to an endpoint yields the
/// whole segment unsplit, oriented so the point comes first. The
/// loop-closure walk relies on this orientation: every returned
/// segment departs from the given point.
pub fn split_line_at_point(line: Segment, point: Point) -> Result<Vec<Segment>, GeomError> {
    if !point_is_on_line(point, line)? {
        return Err(GeomError::PointNotOnSegment(point, line));
    }
    if point == line.start {
        Ok(vec![line])
    } else if point == line.end {
        Ok(vec![line.reversed()])
    } else {
        Ok(vec![
            Segment::new(point, line.start),
            Segment::new(point, line.end),
        ])
    }
}

/// The turn from `from` into `to`, which must start where `from` ends.
///
/// Sign of the 2-D cross product of the two direction vectors, inverted
/// relative to the mathematical convention because the y axis points
/// down: a turn that looks left on screen is `Turn::Left`.
pub fn orientation(from: Segment, to: Segment) -> Result<Turn, GeomError> {
    if from.end != to.start {
        return Err(GeomError::Disconnected(from, to));
    }
    let (dx1, dy1) = from.delta();
    let (dx2, dy2) = to.delta();
    let cross = dx1 * dy2 - dy1 * dx2;
    Ok(if cross < 0 {
        Turn::Left
    } else if cross > 0 {
        Turn::Right
    } else {
        Turn::Straight
    })
}

// ── General segment intersection ─────────────────────────

/// Result of [`intersect_segments`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not meet.
    Empty,
    /// A single crossing or touch point (not necessarily integral).
    At(kurbo::Point),
    /// Collinear segments sharing more than a point.
    Overlap(Segment),
}

/// General 2-D segment intersection via the parametric cross-product
/// method. Not restricted to axis-aligned inputs.
///
/// Writing `a` as `p + t·r` and `b` as `q + u·s`, a proper crossing has
/// `t = (q−p)×s / (r×s)` and `u = (q−p)×r / (r×s)`, both in [0, 1].
/// A near-zero `r×s` means parallel; collinear overlaps are resolved in
/// `a`'s parameter space and reported as a sub-segment. Zero-length
/// inputs are handled as point-membership tests in the parallel branch.
pub fn intersect_segments(a: Segment, b: Segment) -> SegmentIntersection {
    let p = a.start.to_kurbo();
    let q = b.start.to_kurbo();
    let r = a.end.to_kurbo() - p;
    let s = b.end.to_kurbo() - q;
    let qp = q - p;
    let denom = r.cross(s);

    if denom.abs() < PARALLEL_EPS {
        // Parallel branch, degenerate inputs first.
        if r.hypot2() == 0.0 && s.hypot2() == 0.0 {
            return if a.start == b.start {
                SegmentIntersection::At(p)
            } else {
                SegmentIntersection::Empty
            };
        }
        if r.hypot2() == 0.0 {
            return if on_float_segment(p, q, s) {
                SegmentIntersection::At(p)
            } else {
                SegmentIntersection::Empty
            };
        }
        if s.hypot2() == 0.0 {
            return if on_float_segment(q, p, r) {
                SegmentIntersection::At(q)
            } else {
                SegmentIntersection::Empty
            };
        }
        if qp.cross(r).abs() > PARALLEL_EPS {
            // Parallel but not collinear.
            return SegmentIntersection::Empty;
        }
        // Collinear: clamp b's extent to a's parameter range [0, 1].
        let rr = r.dot(r);
        let t0 = qp.dot(r) / rr;
        let t1 = t0 + s.dot(r) / rr;
        let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let lo = lo.max(0.0);
        let hi = hi.min(1.0);
        if lo > hi {
            return SegmentIntersection::Empty;
        }
        if hi - lo < PARALLEL_EPS {
            return SegmentIntersection::At(p + lo * r);
        }
        // Overlap endpoints coincide with endpoints of the integer
        // inputs, so rounding back is exact.
        let from = p + lo * r;
        let to = p + hi * r;
        SegmentIntersection::Overlap(Segment::new(
            Point::new(from.x.round() as i32, from.y.round() as i32),
            Point::new(to.x.round() as i32, to.y.round() as i32),
        ))
    } else {
        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            SegmentIntersection::At(p + t * r)
        } else {
            SegmentIntersection::Empty
        }
    }
}

/// Float point-on-segment test: `pt` against the segment from `origin`
/// with direction `dir`.
fn on_float_segment(pt: kurbo::Point, origin: kurbo::Point, dir: kurbo::Vec2) -> bool {
    let w = pt - origin;
    if w.cross(dir).abs() > PARALLEL_EPS {
        return false;
    }
    let along = w.dot(dir);
    (0.0..=dir.dot(dir)).contains(&along)
}
