//! Loop-closure resolution.
//!
//! When the player's trail reconnects with the open-region boundary,
//! the trail alone is not a closed loop — it still needs the stretch of
//! boundary between its two endpoints. [`find_path`] finds that
//! stretch: it departs from the trail's end point along the boundary,
//! walks vertex to vertex, and stops where the trail's start point lies
//! on the current edge. The assembled loop (trail first, boundary arc
//! after) is ready to be turned into a polygon and split off.

use crate::error::GeomError;
use crate::geom::{
    lines_with_point, orientation, point_is_on_line, split_line_at_point, Segment, Turn,
};

/// Complete `trail` into a closed loop against `boundary`.
///
/// `boundary` is the open region's edge list (wrap-around included);
/// `trail` is the player's finished path, both endpoints on the
/// boundary. Returns the loop as segments: the trail's own, then the
/// boundary-following sub-segments back to the trail's start.
///
/// The departure at the trail's end is chosen by turn sign: of the
/// partial segments produced by splitting every containing boundary
/// segment at the end point, the walk takes the one turning
/// [`Turn::Right`] relative to the trail's final segment (screen
/// coordinates, y down). The two candidate departures trace the two
/// complementary arcs; the right turn picks one consistently, and the
/// caller's containment test decides which split half stays open.
pub fn find_path(boundary: &[Segment], trail: &[Segment]) -> Result<Vec<Segment>, GeomError> {
    let (&first, &last) = match (trail.first(), trail.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(GeomError::TooFewPoints(trail.len())),
    };
    let start_point = first.start;

    let mut current = departure(boundary, last)?;
    let mut closed = trail.to_vec();
    // Each boundary segment contributes at most two partials, so a
    // walk that runs longer has left the polygon.
    let mut steps_left = 2 * boundary.len() + 2;

    loop {
        if point_is_on_line(start_point, current)? {
            if start_point != current.start {
                closed.push(Segment::new(current.start, start_point));
            }
            break;
        }
        closed.push(current);

        steps_left -= 1;
        if steps_left == 0 {
            return Err(GeomError::NoClosingPath);
        }
        current = advance(boundary, current)?;
    }
    Ok(closed)
}

/// The boundary partial the walk departs on from the trail's end.
///
/// A right turn is taken when one exists (a mid-segment landing always
/// offers one). At a reflex boundary vertex the departures can be a
/// straight continuation and a left turn instead; the straight one is
/// the fallback. Antiparallel partials also have a zero cross product,
/// so they are excluded by heading before the turn test — departing
/// back along the trail's own line is never a closure.
fn departure(boundary: &[Segment], last: Segment) -> Result<Segment, GeomError> {
    let (dx, dy) = last.heading();
    let backward = (-dx, -dy);
    let mut straight = None;
    for line in lines_with_point(boundary, last.end)? {
        for part in split_line_at_point(line, last.end)? {
            if part.start == part.end || part.heading() == backward {
                continue;
            }
            match orientation(last, part)? {
                Turn::Right => return Ok(part),
                Turn::Straight if straight.is_none() => straight = Some(part),
                _ => {}
            }
        }
    }
    straight.ok_or(GeomError::NoClosingPath)
}

/// The next boundary partial after `current`, continuing past its end
/// vertex without doubling back.
fn advance(boundary: &[Segment], current: Segment) -> Result<Segment, GeomError> {
    let at = current.end;
    let (dx, dy) = current.heading();
    let backward = (-dx, -dy);
    for line in lines_with_point(boundary, at)? {
        for part in split_line_at_point(line, at)? {
            if part.start == part.end || part.heading() == backward {
                continue;
            }
            return Ok(part);
        }
    }
    Err(GeomError::NoClosingPath)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(s: (i32, i32), e: (i32, i32)) -> Segment {
        Segment::from((s, e))
    }

    /// The fixture boundary: rectangle (0,0)-(0,50)-(40,50)-(40,0).
    fn boundary_rectangular() -> Vec<Segment> {
        vec![
            seg((0, 0), (0, 50)),
            seg((0, 50), (40, 50)),
            seg((40, 50), (40, 0)),
            seg((40, 0), (0, 0)),
        ]
    }

    #[test]
    fn departure_splits_the_containing_edge_and_turns_right() {
        let boundary = boundary_rectangular();
        let last = seg((20, 30), (0, 30));

        let containing = lines_with_point(&boundary, last.end).unwrap();
        assert_eq!(containing, vec![seg((0, 0), (0, 50))]);

        let parts = split_line_at_point(containing[0], last.end).unwrap();
        assert_eq!(parts, vec![seg((0, 30), (0, 0)), seg((0, 30), (0, 50))]);

        assert_eq!(departure(&boundary, last).unwrap(), seg((0, 30), (0, 0)));
    }

    #[test]
    fn closes_a_trail_whose_endpoints_share_a_boundary_edge() {
        let boundary = boundary_rectangular();
        let trail = vec![
            seg((0, 20), (20, 20)),
            seg((20, 20), (20, 30)),
            seg((20, 30), (0, 30)),
        ];
        let closed = find_path(&boundary, &trail).unwrap();
        assert_eq!(
            closed,
            vec![
                seg((0, 20), (20, 20)),
                seg((20, 20), (20, 30)),
                seg((20, 30), (0, 30)),
                seg((0, 30), (0, 20)),
            ],
        );
    }

    #[test]
    fn walks_around_corners_when_the_endpoints_are_on_different_edges() {
        let boundary = boundary_rectangular();
        // Ends mid-way down the right wall; the right-turn departure
        // walks down, along the bottom, and back up the left wall.
        let trail = vec![
            seg((0, 20), (20, 20)),
            seg((20, 20), (20, 10)),
            seg((20, 10), (40, 10)),
        ];
        let closed = find_path(&boundary, &trail).unwrap();
        assert_eq!(
            closed,
            vec![
                seg((0, 20), (20, 20)),
                seg((20, 20), (20, 10)),
                seg((20, 10), (40, 10)),
                seg((40, 10), (40, 50)),
                seg((40, 50), (0, 50)),
                seg((0, 50), (0, 20)),
            ],
        );
    }

    #[test]
    fn trail_ending_on_a_reflex_vertex_is_resolved() {
        // L-shaped boundary with a reflex corner at (20, 20); the trail
        // lands exactly on that vertex, so the containing edges are
        // returned unsplit, point first, and the straight continuation
        // is the departure (no right turn exists there).
        let boundary = vec![
            seg((0, 0), (0, 50)),
            seg((0, 50), (40, 50)),
            seg((40, 50), (40, 20)),
            seg((40, 20), (20, 20)),
            seg((20, 20), (20, 0)),
            seg((20, 0), (0, 0)),
        ];
        let trail = vec![seg((0, 20), (20, 20))];
        let closed = find_path(&boundary, &trail).unwrap();
        assert_eq!(
            closed,
            vec![
                seg((0, 20), (20, 20)),
                seg((20, 20), (40, 20)),
                seg((40, 20), (40, 50)),
                seg((40, 50), (0, 50)),
                seg((0, 50), (0, 20)),
            ],
        );
    }

    #[test]
    fn empty_trail_is_an_error() {
        assert_eq!(
            find_path(&boundary_rectangular(), &[]),
            Err(GeomError::TooFewPoints(0)),
        );
    }

    #[test]
    fn trail_ending_off_the_boundary_has_no_closing_path() {
        let boundary = boundary_rectangular();
        let trail = vec![seg((0, 20), (20, 20))];
        assert_eq!(find_path(&boundary, &trail), Err(GeomError::NoClosingPath));
    }
}
