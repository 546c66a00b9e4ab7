// End-to-end closure scenarios: trail → resolver → split → containment
// → claimed area, driven through the public API only.

use stixcarve::{
    find_path, ArenaConfig, ClosedPolyline, Field, GeomError, Hit, Point, Polyline, Segment,
};

fn arena(width: i32, height: i32) -> ArenaConfig {
    ArenaConfig {
        width,
        height,
        left_margin: 0,
        right_margin: 0,
        top_margin: 0,
        bottom_margin: 0,
    }
}

fn seg(s: (i32, i32), e: (i32, i32)) -> Segment {
    Segment::from((s, e))
}

#[test]
fn resolver_closes_the_reference_trail() {
    // Boundary rectangle (0,0)-(0,50)-(40,50)-(40,0); trail cutting a
    // 20x10 notch out of the left wall.
    let boundary = ClosedPolyline::from(vec![(0, 0), (0, 50), (40, 50), (40, 0)]);
    let boundary_segments: Vec<Segment> = boundary.segments().collect();
    let trail = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (0, 30)]);

    let closed = find_path(&boundary_segments, &trail.to_segments().unwrap()).unwrap();
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
fn the_resolved_loop_encloses_the_claimed_area() {
    let boundary = ClosedPolyline::from(vec![(0, 0), (0, 50), (40, 50), (40, 0)]);
    let boundary_segments: Vec<Segment> = boundary.segments().collect();
    let trail = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (0, 30)]);

    let closed = find_path(&boundary_segments, &trail.to_segments().unwrap()).unwrap();
    let loop_polygon = ClosedPolyline::new(closed.iter().map(|s| s.start).collect());
    assert_eq!(loop_polygon.area().unsigned_abs(), 200);
    assert!(loop_polygon.surrounds(Point::new(10, 25)));
    assert!(!loop_polygon.surrounds(Point::new(30, 25)));
}

#[test]
fn a_full_tick_from_trail_to_scored_claim() {
    let mut field = Field::new(&arena(40, 50)).unwrap();
    let adversary = Point::new(30, 40);

    // The trail's final step reconnects with the boundary.
    let mut trail = Polyline::from(vec![(0, 20), (20, 20), (20, 30)]);
    let step = seg((20, 30), (0, 30));
    match field.hit_boundary(step, Some(Point::new(20, 30))).unwrap() {
        Some(Hit::At(p)) => assert_eq!(p, Point::new(0, 30)),
        other => panic!("expected the step to reach the wall, got {:?}", other),
    }
    trail.append(Point::new(0, 30));

    let claim = field.close(&trail, adversary).unwrap();
    assert_eq!(claim.area, 200);
    assert_eq!(field.open_area() + field.claimed_area(), 40 * 50);

    // The adversary's half stayed open, the notch is claimed.
    assert!(field.open_region().surrounds(adversary));
    assert!(field.claims()[claim.index].surrounds(Point::new(10, 25)));
    assert!(!field.open_region().surrounds(Point::new(10, 25)));
}

#[test]
fn repeated_carving_keeps_the_areas_consistent() {
    let mut field = Field::new(&arena(100, 100)).unwrap();
    let adversary = Point::new(80, 80);

    let trails = [
        // A notch off the left wall.
        Polyline::from(vec![(0, 10), (30, 10), (30, 40), (0, 40)]),
        // A strip off the top, cutting across the full width.
        Polyline::from(vec![(0, 5), (100, 5)]),
        // A corner bite off the bottom-left.
        Polyline::from(vec![(0, 70), (20, 70), (20, 100)]),
    ];

    let mut claimed = 0;
    for trail in &trails {
        let claim = field.close(trail, adversary).unwrap();
        assert!(claim.area > 0);
        claimed += claim.area;
        assert_eq!(field.claimed_area(), claimed);
        assert_eq!(field.open_area() + claimed, 100 * 100);
        assert!(field.open_region().surrounds(adversary));
    }
    assert_eq!(field.claims().len(), trails.len());
}

#[test]
fn an_invalid_closure_attempt_rejects_the_move_and_keeps_state() {
    let mut field = Field::new(&arena(40, 50)).unwrap();
    let open_before = field.open_region().clone();

    // The trail never reached the boundary: the caller treats the
    // error as "illegal move" and carries on.
    let dangling = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (10, 30)]);
    assert_eq!(
        field.close(&dangling, Point::new(30, 40)),
        Err(GeomError::PointNotOnPath(Point::new(10, 30))),
    );
    assert_eq!(field.open_region(), &open_before);
    assert_eq!(field.claimed_area(), 0);

    // The same field still accepts a valid closure afterwards.
    let trail = Polyline::from(vec![(0, 20), (20, 20), (20, 30), (0, 30)]);
    assert_eq!(field.close(&trail, Point::new(30, 40)).unwrap().area, 200);
}
