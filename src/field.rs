//! Playfield state: the open region, the claimed regions, and the
//! boundary indices.
//!
//! [`Field`] is the game-state owner the geometric core serves. It
//! holds the single mutable open region, the append-only list of
//! claimed regions, and the two [`LineStore`] indices of the open
//! boundary used for per-tick collision probes. A successful
//! [`Field::close`] is the closure transaction of one simulation tick:
//! splice the trail's endpoints into the boundary, split, keep the half
//! containing the adversary open, record the other as a claim, and
//! rebuild the indices — all eagerly, with every fallible step done
//! before any state changes.

use tracing::{debug, warn};

use crate::config::ArenaConfig;
use crate::error::GeomError;
use crate::geom::{Point, Segment};
use crate::linestore::{decompose, line_intersect, Hit, LineStore};
use crate::polyline::{ClosedPolyline, Polyline};

/// The outcome of one successful loop closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    /// Absolute area of the newly claimed region, in square pixels.
    pub area: u64,
    /// Index of the new region in [`Field::claims`].
    pub index: usize,
}

/// Game-state owner: open region, claimed regions, boundary indices.
#[derive(Debug, Clone)]
pub struct Field {
    open_region: ClosedPolyline,
    claims: Vec<ClosedPolyline>,
    horizontals: LineStore,
    verticals: LineStore,
}

impl Field {
    /// Seed the open region from the configured playfield rectangle and
    /// build its indices.
    pub fn new(config: &ArenaConfig) -> Result<Field, GeomError> {
        let (top_left, bottom_right) = config.playfield();
        let open_region = ClosedPolyline::from_rect(top_left, bottom_right);
        let (horizontals, verticals) = indices_for(&open_region)?;
        Ok(Field {
            open_region,
            claims: Vec::new(),
            horizontals,
            verticals,
        })
    }

    /// The current open-region boundary.
    pub fn open_region(&self) -> &ClosedPolyline {
        &self.open_region
    }

    /// All claimed regions, oldest first. Each retains its polygon, so
    /// its signed [`area`](ClosedPolyline::area) stays available.
    pub fn claims(&self) -> &[ClosedPolyline] {
        &self.claims
    }

    /// Horizontal index of the open boundary (post-simplify).
    pub fn horizontals(&self) -> &LineStore {
        &self.horizontals
    }

    /// Vertical index of the open boundary (post-simplify).
    pub fn verticals(&self) -> &LineStore {
        &self.verticals
    }

    /// Absolute area of the open region.
    pub fn open_area(&self) -> u64 {
        self.open_region.area().unsigned_abs()
    }

    /// Total absolute area claimed so far.
    pub fn claimed_area(&self) -> u64 {
        self.claims.iter().map(|c| c.area().unsigned_abs()).sum()
    }

    /// Probe the open boundary with an orthogonal segment — the
    /// per-tick collision test for the player's movement. `ignore`
    /// (typically the player's current position) suppresses
    /// single-point touches.
    pub fn hit_boundary(
        &self,
        probe: Segment,
        ignore: Option<Point>,
    ) -> Result<Option<Hit>, GeomError> {
        if let Some(hit) = line_intersect(probe, &self.horizontals, ignore)? {
            return Ok(Some(hit));
        }
        line_intersect(probe, &self.verticals, ignore)
    }

    /// Carve the region enclosed by `trail` off the open area.
    ///
    /// The trail must have at least two points and both endpoints on
    /// the current open boundary; its interior points must lie strictly
    /// inside the open region (not validated — simplicity is the
    /// caller's contract, kept by the game loop's per-tick collision
    /// checks). The half of the split **not** containing `adversary`
    /// becomes the claim; on any error the field is left unchanged.
    pub fn close(&mut self, trail: &Polyline, adversary: Point) -> Result<Claim, GeomError> {
        let (first, last) = match trail.points() {
            &[first, .., last] => (first, last),
            points => return Err(GeomError::TooFewPoints(points.len())),
        };
        if first == last {
            // A trail biting its own tail never closes against the
            // boundary.
            return Err(GeomError::NoClosingPath);
        }

        // Splice the trail's endpoints into a working copy so they are
        // vertices the split can anchor on. Endpoints that already are
        // vertices (a landing on a corner) are left alone.
        let mut boundary = self.open_region.clone();
        if !boundary.contains(first) {
            boundary.insert(first, None)?;
        }
        if !boundary.contains(last) {
            boundary.insert(last, None)?;
        }

        let (forward, backward) = boundary.split(trail.points())?;
        let (open, claimed) = if forward.surrounds(adversary) {
            (forward, backward)
        } else if backward.surrounds(adversary) {
            (backward, forward)
        } else {
            // The adversary sits where the edge policy counts it in
            // neither half; keep the larger half open.
            warn!(%adversary, "adversary in neither split half, keeping the larger one open");
            if forward.area().unsigned_abs() >= backward.area().unsigned_abs() {
                (forward, backward)
            } else {
                (backward, forward)
            }
        };

        let (horizontals, verticals) = indices_for(&open)?;
        let area = claimed.area().unsigned_abs();
        debug!(
            area,
            open_area = open.area().unsigned_abs(),
            claims = self.claims.len() + 1,
            "loop closed"
        );

        self.open_region = open;
        self.horizontals = horizontals;
        self.verticals = verticals;
        self.claims.push(claimed);
        Ok(Claim {
            area,
            index: self.claims.len() - 1,
        })
    }
}

/// Decompose a boundary into simplified horizontal/vertical indices.
fn indices_for(boundary: &ClosedPolyline) -> Result<(LineStore, LineStore), GeomError> {
    let (mut horizontals, mut verticals) = decompose(boundary.segments())?;
    horizontals.simplify();
    verticals.simplify();
    Ok((horizontals, verticals))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_40_by_50() -> ArenaConfig {
        ArenaConfig {
            width: 40,
            height: 50,
            left_margin: 0,
            right_margin: 0,
            top_margin: 0,
            bottom_margin: 0,
        }
    }

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn new_field_is_entirely_open() {
        let field = Field::new(&arena_40_by_50()).unwrap();
        assert_eq!(field.open_area(), 40 * 50);
        assert_eq!(field.claimed_area(), 0);
        assert!(field.claims().is_empty());
    }

    #[test]
    fn boundary_indices_cover_the_playfield_rectangle() {
        let field = Field::new(&arena_40_by_50()).unwrap();
        assert_eq!(field.horizontals().lines(0).len(), 1);
        assert_eq!(field.horizontals().lines(50).len(), 1);
        assert_eq!(field.verticals().lines(0).len(), 1);
        assert_eq!(field.verticals().lines(40).len(), 1);
    }

    #[test]
    fn probe_into_the_interior_misses_the_boundary() {
        let field = Field::new(&arena_40_by_50()).unwrap();
        let probe = Segment::from(((10, 10), (10, 20)));
        assert_eq!(field.hit_boundary(probe, None).unwrap(), None);
    }

    #[test]
    fn probe_reaching_a_wall_reports_the_touch() {
        let field = Field::new(&arena_40_by_50()).unwrap();
        let probe = Segment::from(((10, 10), (10, 0)));
        assert_eq!(
            field.hit_boundary(probe, None).unwrap(),
            Some(Hit::At(pt(10, 0))),
        );
    }

    #[test]
    fn probe_ignoring_the_player_position_suppresses_the_touch() {
        let field = Field::new(&arena_40_by_50()).unwrap();
        let probe = Segment::from(((10, 0), (10, 0)));
        assert_eq!(field.hit_boundary(probe, Some(pt(10, 0))).unwrap(), None);
    }

    #[test]
    fn close_claims_the_half_away_from_the_adversary() {
        let mut field = Field::new(&arena_40_by_50()).unwrap();
        let trail = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (0, 30)]);

        let claim = field.close(&trail, pt(30, 40)).unwrap();
        assert_eq!(claim.area, 200);
        assert_eq!(claim.index, 0);

        assert_eq!(field.claimed_area(), 200);
        assert_eq!(field.open_area(), 40 * 50 - 200);
        assert!(field.open_region().surrounds(pt(30, 40)));
        assert!(field.claims()[0].surrounds(pt(10, 25)));
    }

    #[test]
    fn close_rebuilds_the_boundary_indices() {
        let mut field = Field::new(&arena_40_by_50()).unwrap();
        let trail = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (0, 30)]);
        field.close(&trail, pt(30, 40)).unwrap();

        // The carved notch's edges are now part of the boundary.
        let probe = Segment::from(((10, 15), (10, 25)));
        assert_eq!(
            field.hit_boundary(probe, None).unwrap(),
            Some(Hit::At(pt(10, 20))),
        );
        // The left wall now has a gap between y=20 and y=30.
        let wall = field.verticals().lines(0);
        assert_eq!(wall.len(), 2);
    }

    #[test]
    fn successive_closures_accumulate_claims() {
        let mut field = Field::new(&arena_40_by_50()).unwrap();
        let adversary = pt(30, 40);

        let first = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (0, 30)]);
        field.close(&first, adversary).unwrap();

        // Second trail cuts across the full width higher up.
        let second = Polyline::from(vec![(0, 5), (40, 5)]);
        let claim = field.close(&second, adversary).unwrap();
        assert_eq!(claim.area, 40 * 5);
        assert_eq!(claim.index, 1);
        assert_eq!(field.claimed_area(), 200 + 200);
        assert_eq!(field.open_area(), 40 * 50 - 400);
    }

    #[test]
    fn close_with_a_degenerate_trail_is_an_error() {
        let mut field = Field::new(&arena_40_by_50()).unwrap();
        let trail = Polyline::from(vec![(0, 20)]);
        assert_eq!(
            field.close(&trail, pt(30, 40)),
            Err(GeomError::TooFewPoints(1)),
        );
    }

    #[test]
    fn close_with_a_trail_off_the_boundary_leaves_state_unchanged() {
        let mut field = Field::new(&arena_40_by_50()).unwrap();
        let before = field.open_region().clone();
        // Starts in the interior, not on the boundary.
        let trail = Polyline::from(vec![(10, 20), (20, 20), (20, 30)]);
        assert_eq!(
            field.close(&trail, pt(30, 40)),
            Err(GeomError::PointNotOnPath(pt(10, 20))),
        );
        assert_eq!(field.open_region(), &before);
        assert!(field.claims().is_empty());
    }
}
