//! Ordered-vertex boundary paths.
//!
//! Two concrete types share the vertex-sequence representation: an open
//! [`Polyline`] (the player's in-progress trail — consecutive points
//! form segments, no closing edge) and a [`ClosedPolyline`] (a region
//! boundary — the last point implicitly connects back to the first).
//! The behavioral differences are exactly whether the wrap-around edge
//! participates in iteration/insertion, which arcs `replace` may
//! rewrite, and that `split`/`area`/`surrounds` only make sense closed.
//!
//! Polygons are assumed simple (non-self-intersecting); `area` and
//! `surrounds` are meaningful only under that precondition, which the
//! engine does not validate.

use crate::error::GeomError;
use crate::geom::{intersect_segments, point_is_on_line, Point, Segment, SegmentIntersection};

// ── Open polyline ────────────────────────────────────────

/// An open orthogonal path: n points, n−1 segments, no closing edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Polyline { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    /// Index of `point` among the vertices, if present.
    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.points.iter().position(|&p| p == point)
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Extend the path by one point at the end.
    pub fn append(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Consecutive point pairs, excluding any wrap-around edge.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// The path's segments as a vector; errors on fewer than two points.
    pub fn to_segments(&self) -> Result<Vec<Segment>, GeomError> {
        if self.points.len() < 2 {
            return Err(GeomError::TooFewPoints(self.points.len()));
        }
        Ok(self.segments().collect())
    }

    /// Splice `point` into the path.
    ///
    /// With `after`, the point goes immediately behind that existing
    /// vertex regardless of geometry. Without it, the point must lie on
    /// some existing segment; the first containing segment in iteration
    /// order determines the slot.
    pub fn insert(&mut self, point: Point, after: Option<Point>) -> Result<(), GeomError> {
        let at = insert_index(&self.points, false, point, after)?;
        self.points.insert(at, point);
        Ok(())
    }

    /// Rewrite the run of vertices between `sub_path`'s endpoints
    /// (which must be existing vertices) with `sub_path` itself,
    /// returning the new path. Only the forward (index-increasing) run
    /// is valid for an open path.
    pub fn replace(&self, sub_path: &[Point]) -> Result<Polyline, GeomError> {
        let (first, last) = endpoints(sub_path)?;
        let start = self.index_of(first).ok_or(GeomError::VertexNotFound(first))?;
        let end = self.index_of(last).ok_or(GeomError::VertexNotFound(last))?;
        if start > end {
            return Err(GeomError::ReverseDirection);
        }
        let mut points = Vec::with_capacity(self.points.len() + sub_path.len());
        points.extend_from_slice(&self.points[..start]);
        points.extend_from_slice(sub_path);
        points.extend_from_slice(&self.points[end + 1..]);
        Ok(Polyline::new(points))
    }

    /// First intersection of `probe` with any of the path's segments,
    /// via the general float primitive — the probe may be diagonal. A
    /// collinear overlap reports its starting point.
    pub fn intersect(&self, probe: Segment) -> Option<kurbo::Point> {
        for segment in self.segments() {
            match intersect_segments(segment, probe) {
                SegmentIntersection::At(p) => return Some(p),
                SegmentIntersection::Overlap(run) => return Some(run.start.to_kurbo()),
                SegmentIntersection::Empty => {}
            }
        }
        None
    }

    /// The same path traversed the other way.
    pub fn reversed(&self) -> Polyline {
        Polyline::new(self.points.iter().rev().copied().collect())
    }
}

impl From<Vec<(i32, i32)>> for Polyline {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Polyline::new(points.into_iter().map(Point::from).collect())
    }
}

// ── Closed polyline ──────────────────────────────────────

/// A closed orthogonal polygon: the last point implicitly connects back
/// to the first, so n points form n segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPolyline {
    points: Vec<Point>,
}

impl ClosedPolyline {
    pub fn new(points: Vec<Point>) -> Self {
        ClosedPolyline { points }
    }

    /// The four corners of an axis-aligned rectangle, starting at the
    /// top-left and running clockwise on screen.
    pub fn from_rect(top_left: Point, bottom_right: Point) -> Self {
        ClosedPolyline::new(vec![
            top_left,
            Point::new(bottom_right.x, top_left.y),
            bottom_right,
            Point::new(top_left.x, bottom_right.y),
        ])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.points.iter().position(|&p| p == point)
    }

    /// Consecutive point pairs including the wrap-around (last → first)
    /// pair. Empty for fewer than two points.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Splice `point` into the boundary; see [`Polyline::insert`]. The
    /// wrap-around segment participates, so a point on the closing edge
    /// lands after the current last vertex.
    pub fn insert(&mut self, point: Point, after: Option<Point>) -> Result<(), GeomError> {
        let at = insert_index(&self.points, true, point, after)?;
        self.points.insert(at, point);
        Ok(())
    }

    /// Rewrite one of the two arcs between `sub_path`'s endpoints
    /// (which must be existing vertices) with `sub_path` itself,
    /// returning the new polygon.
    ///
    /// The arc is resolved by index order: when the start vertex
    /// precedes the end vertex, the forward run between them is
    /// replaced; otherwise the wrap-around run (end of the list through
    /// the front) is. Exactly one of the two complementary arcs is
    /// rewritten either way.
    pub fn replace(&self, sub_path: &[Point]) -> Result<ClosedPolyline, GeomError> {
        let (first, last) = endpoints(sub_path)?;
        let start = self.index_of(first).ok_or(GeomError::VertexNotFound(first))?;
        let end = self.index_of(last).ok_or(GeomError::VertexNotFound(last))?;
        let mut points = Vec::with_capacity(self.points.len() + sub_path.len());
        if start < end {
            points.extend_from_slice(&self.points[..start]);
            points.extend_from_slice(sub_path);
            points.extend_from_slice(&self.points[end + 1..]);
        } else {
            points.extend_from_slice(sub_path);
            points.extend_from_slice(&self.points[end + 1..start]);
        }
        Ok(ClosedPolyline::new(points))
    }

    /// Split the polygon along `sub_path` into two complementary
    /// polygons: `replace(sub_path)` and `replace(reversed sub_path)`.
    ///
    /// Each edge of `sub_path` appears in exactly one orientation in
    /// each result, and the two results share exactly `sub_path`'s
    /// points and no other vertex.
    pub fn split(
        &self,
        sub_path: &[Point],
    ) -> Result<(ClosedPolyline, ClosedPolyline), GeomError> {
        let forward = self.replace(sub_path)?;
        let reversed: Vec<Point> = sub_path.iter().rev().copied().collect();
        let backward = self.replace(&reversed)?;
        Ok((forward, backward))
    }

    /// Signed area: `Σ xᵢ·(yᵢ₊₁ − yᵢ)` over every edge, wrap-around
    /// included — the sum of rectangles beside each vertical edge,
    /// exact for orthogonal polygons with no division by two.
    ///
    /// The sign encodes traversal direction and is intentionally not
    /// clamped; reversing the polygon negates it.
    pub fn area(&self) -> i64 {
        self.segments()
            .map(|s| s.start.x as i64 * (s.end.y as i64 - s.start.y as i64))
            .sum()
    }

    /// Point-in-polygon test by counting vertical edges strictly to the
    /// right of the point.
    ///
    /// An edge counts as a crossing iff the point's y is the median of
    /// {edge y₀, edge y₁, point y} and differs from the maximum. That
    /// rule makes the top and left boundary edges inclusive and the
    /// right and bottom edges exclusive — callers must respect the
    /// asymmetry rather than assume a symmetric edge policy.
    pub fn surrounds(&self, point: Point) -> bool {
        let mut crossings = 0u32;
        for edge in self.segments() {
            if edge.start.x == edge.end.x && edge.start.x > point.x {
                let mut ys = [edge.start.y, edge.end.y, point.y];
                ys.sort_unstable();
                if point.y == ys[1] && point.y != ys[2] {
                    crossings += 1;
                }
            }
        }
        crossings % 2 == 1
    }

    /// The same polygon traversed the other way.
    pub fn reversed(&self) -> ClosedPolyline {
        ClosedPolyline::new(self.points.iter().rev().copied().collect())
    }
}

impl From<Vec<(i32, i32)>> for ClosedPolyline {
    fn from(points: Vec<(i32, i32)>) -> Self {
        ClosedPolyline::new(points.into_iter().map(Point::from).collect())
    }
}

// ── Shared internals ─────────────────────────────────────

/// Resolve the vertex index a new point should be inserted at.
fn insert_index(
    points: &[Point],
    wrap: bool,
    point: Point,
    after: Option<Point>,
) -> Result<usize, GeomError> {
    if let Some(anchor) = after {
        let at = points
            .iter()
            .position(|&p| p == anchor)
            .ok_or(GeomError::VertexNotFound(anchor))?;
        return Ok(at + 1);
    }
    let n = points.len();
    let count = if wrap { n } else { n.saturating_sub(1) };
    for i in 0..count {
        let segment = Segment::new(points[i], points[(i + 1) % n]);
        if point_is_on_line(point, segment)? {
            return Ok(i + 1);
        }
    }
    Err(GeomError::PointNotOnPath(point))
}

fn endpoints(sub_path: &[Point]) -> Result<(Point, Point), GeomError> {
    match (sub_path.first(), sub_path.last()) {
        (Some(&first), Some(&last)) => Ok((first, last)),
        _ => Err(GeomError::TooFewPoints(0)),
    }
}
