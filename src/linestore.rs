//! Spatial index of axis-aligned segments bucketed by their shared
//! coordinate.
//!
//! Horizontal segments are keyed by their row (y), vertical segments by
//! their column (x); either way the segment itself collapses to a 1-D
//! span on the other axis. The store supports O(1) insertion, merging of
//! overlapping spans into maximal disjoint runs ("simplify"), exact and
//! proximity-tolerant lookup, and intersection probes against an
//! arbitrary orthogonal segment.

use std::collections::HashMap;

use crate::error::GeomError;
use crate::geom::{point_is_on_line, Axis, Point, Segment};

/// A bucketed index of axis-aligned segments sharing one orientation.
///
/// Spans are stored exactly as added — direction preserved, duplicates
/// and overlaps allowed — until [`simplify`](LineStore::simplify)
/// establishes the maximal-disjoint-run invariant at each key.
#[derive(Debug, Clone)]
pub struct LineStore {
    axis: Axis,
    spans: HashMap<i32, Vec<(i32, i32)>>,
}

impl LineStore {
    pub fn new(axis: Axis) -> Self {
        LineStore {
            axis,
            spans: HashMap::new(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Add a segment, keyed by its **first** endpoint's shared-axis
    /// coordinate.
    ///
    /// The segment is not checked against the store's own orientation;
    /// routing horizontal vs. vertical segments correctly is the
    /// caller's contract (see [`decompose`]). A mis-routed segment is
    /// silently flattened onto the wrong axis.
    pub fn add(&mut self, line: Segment) {
        let (key, span) = match self.axis() {
            Axis::Horizontal => (line.start.y, (line.start.x, line.end.x)),
            Axis::Vertical => (line.start.x, (line.start.y, line.end.y)),
        };
        self.spans.entry(key).or_default().push(span);
    }

    /// Merge overlapping or touching spans at every key into sorted
    /// maximal disjoint runs. Idempotent, and span direction is
    /// canonicalized ascending.
    pub fn simplify(&mut self) {
        for spans in self.spans.values_mut() {
            merge_spans(spans);
        }
    }

    /// [`simplify`](LineStore::simplify) restricted to one key.
    pub fn simplify_key(&mut self, key: i32) {
        if let Some(spans) = self.spans.get_mut(&key) {
            merge_spans(spans);
        }
    }

    /// All segments stored at exactly `key`, reconstructed into full
    /// segment form.
    pub fn lines(&self, key: i32) -> Vec<Segment> {
        self.spans
            .get(&key)
            .map(|spans| {
                spans
                    .iter()
                    .map(|&span| self.make_line(key, span))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Proximity lookup: segments at `key`, `key±1`, `key±2`, closest
    /// first — tolerant matching for a position that may be off by
    /// integer rounding.
    pub fn near(&self, key: i32) -> Vec<Segment> {
        [key, key - 1, key + 1, key - 2, key + 2]
            .into_iter()
            .flat_map(|k| self.lines(k))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.values().all(|s| s.is_empty())
    }

    fn make_line(&self, key: i32, (a, b): (i32, i32)) -> Segment {
        match self.axis() {
            Axis::Horizontal => Segment::new(Point::new(a, key), Point::new(b, key)),
            Axis::Vertical => Segment::new(Point::new(key, a), Point::new(key, b)),
        }
    }
}

/// Sort spans lexicographically and sweep once, merging any that
/// overlap or touch. The merged end takes the max so a span contained
/// in a longer one can never truncate it — coverage is preserved.
fn merge_spans(spans: &mut Vec<(i32, i32)>) {
    if spans.is_empty() {
        return;
    }
    let mut sorted: Vec<(i32, i32)> = spans
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();
    sorted.sort_unstable();

    let mut merged = Vec::with_capacity(sorted.len());
    let mut run = sorted[0];
    for &(start, end) in &sorted[1..] {
        if run.1 < start {
            merged.push(run);
            run = (start, end);
        } else {
            run.1 = run.1.max(end);
        }
    }
    merged.push(run);
    *spans = merged;
}

/// Route a collection of axis-aligned segments into a (horizontal,
/// vertical) store pair. Errors on the first diagonal segment.
pub fn decompose(
    segments: impl IntoIterator<Item = Segment>,
) -> Result<(LineStore, LineStore), GeomError> {
    let mut horizontals = LineStore::new(Axis::Horizontal);
    let mut verticals = LineStore::new(Axis::Vertical);
    for segment in segments {
        match segment.axis() {
            Some(Axis::Horizontal) => horizontals.add(segment),
            Some(Axis::Vertical) => verticals.add(segment),
            None => return Err(GeomError::Diagonal(segment)),
        }
    }
    Ok((horizontals, verticals))
}

/// Result of probing a [`LineStore`] with [`line_intersect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Exact single-point touch.
    At(Point),
    /// 1-D overlap along a shared row or column, endpoints ascending.
    Overlap(Segment),
}

/// Test `probe` against every segment in `store`.
///
/// Same-orientation comparisons check 1-D span overlap at the probe's
/// key and may report a point (exact touch) or a sub-segment (overlap).
/// Cross-orientation comparisons scan every integer coordinate along
/// the probe's span and test point membership in the store. The
/// `ignore` point — typically the player's current position — is
/// excluded from single-point hits so that touching one's own location
/// does not register as a collision.
pub fn line_intersect(
    probe: Segment,
    store: &LineStore,
    ignore: Option<Point>,
) -> Result<Option<Hit>, GeomError> {
    let probe_axis = probe.axis().ok_or(GeomError::Diagonal(probe))?;

    match (probe_axis, store.axis()) {
        (Axis::Horizontal, Axis::Horizontal) => {
            let y = probe.start.y;
            let (x_start, x_end) = ordered(probe.start.x, probe.end.x);
            for line in store.lines(y) {
                let (x0, x1) = ordered(line.start.x, line.end.x);
                let i0 = x0.max(x_start);
                let i1 = x1.min(x_end);
                if i0 == i1 {
                    let touch = Point::new(i0, y);
                    if Some(touch) != ignore {
                        return Ok(Some(Hit::At(touch)));
                    }
                } else if i0 < i1 {
                    return Ok(Some(Hit::Overlap(Segment::new(
                        Point::new(i0, y),
                        Point::new(i1, y),
                    ))));
                }
            }
        }
        (Axis::Vertical, Axis::Vertical) => {
            let x = probe.start.x;
            let (y_start, y_end) = ordered(probe.start.y, probe.end.y);
            for line in store.lines(x) {
                let (y0, y1) = ordered(line.start.y, line.end.y);
                let i0 = y0.max(y_start);
                let i1 = y1.min(y_end);
                if i0 == i1 {
                    let touch = Point::new(x, i0);
                    if Some(touch) != ignore {
                        return Ok(Some(Hit::At(touch)));
                    }
                } else if i0 < i1 {
                    return Ok(Some(Hit::Overlap(Segment::new(
                        Point::new(x, i0),
                        Point::new(x, i1),
                    ))));
                }
            }
        }
        (Axis::Horizontal, Axis::Vertical) => {
            let y = probe.start.y;
            let (x_start, x_end) = ordered(probe.start.x, probe.end.x);
            for x in x_start..=x_end {
                if let Some(touch) = point_hit(store, x, Point::new(x, y), ignore)? {
                    return Ok(Some(touch));
                }
            }
        }
        (Axis::Vertical, Axis::Horizontal) => {
            let x = probe.start.x;
            let (y_start, y_end) = ordered(probe.start.y, probe.end.y);
            for y in y_start..=y_end {
                if let Some(touch) = point_hit(store, y, Point::new(x, y), ignore)? {
                    return Ok(Some(touch));
                }
            }
        }
    }
    Ok(None)
}

/// Membership test of a single point against the store lines at `key`.
fn point_hit(
    store: &LineStore,
    key: i32,
    candidate: Point,
    ignore: Option<Point>,
) -> Result<Option<Hit>, GeomError> {
    if Some(candidate) == ignore {
        return Ok(None);
    }
    for line in store.lines(key) {
        if point_is_on_line(candidate, line)? {
            return Ok(Some(Hit::At(candidate)));
        }
    }
    Ok(None)
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    (a.min(b), a.max(b))
}
