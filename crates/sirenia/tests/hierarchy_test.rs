use sirenia::curve::{CubicBezier, LineSegment, Polyline, Segment};
use sirenia::geom::{point, vector};
use sirenia::hierarchy::Hierarchy;
use sirenia::parallelogram::Parallelogram;

/// Deterministic scatter of short segments over a 1000 x 1000 square.
fn scattered_segments(count: usize) -> Vec<LineSegment> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 10_000) as f64 / 10.0
    };
    (0..count)
        .map(|_| {
            let (x, y) = (next(), next());
            let (dx, dy) = (next() / 20.0, next() / 20.0);
            LineSegment::new(point(x, y), point(x + dx, y + dy))
        })
        .collect()
}

#[test]
fn empty_hierarchy_never_intersects() {
    let h = Hierarchy::build(Vec::new(), 2);
    assert!(h.is_empty());
    assert_eq!(h.leaf_count(), 0);
    let probe = Segment::Line(LineSegment::new(point(0.0, 0.0), point(10.0, 10.0)));
    assert!(!h.intersects(&probe));
}

#[test]
fn single_leaf_is_the_root() {
    let h = Hierarchy::from_segments(
        vec![LineSegment::new(point(0.0, 0.0), point(10.0, 0.0))],
        2,
    );
    assert_eq!(h.leaf_count(), 1);
    assert_eq!(h.root().unwrap().depth(), 1);
}

#[test]
fn every_leaf_is_kept_and_the_tree_stays_shallow() {
    let h = Hierarchy::from_segments(scattered_segments(64), 2);
    assert_eq!(h.leaf_count(), 64);
    assert!(h.root().unwrap().depth() <= 17);
}

#[test]
fn tree_query_matches_brute_force() {
    let segments = scattered_segments(200);
    let h = Hierarchy::from_segments(segments.clone(), 2);
    let probes = [
        LineSegment::new(point(0.0, 0.0), point(1000.0, 1000.0)),
        LineSegment::new(point(0.0, 500.0), point(1000.0, 500.0)),
        LineSegment::new(point(250.0, 0.0), point(260.0, 1000.0)),
        LineSegment::new(point(10.0, 10.0), point(12.0, 11.0)),
    ];
    for probe in probes {
        let expected = segments.iter().any(|s| probe.intersection(s).is_some());
        assert_eq!(h.intersects(&Segment::Line(probe)), expected, "{probe:?}");
    }
}

#[test]
fn polygon_boundaries_become_one_leaf_per_side() {
    let square = Polyline::closed(vec![
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ]);
    let triangle = Polyline::closed(vec![point(20.0, 0.0), point(30.0, 0.0), point(25.0, 5.0)]);
    let h = Hierarchy::from_polylines([&square, &triangle], 2);
    assert_eq!(h.leaf_count(), 7);

    let through_square = Segment::Line(LineSegment::new(point(-5.0, 5.0), point(5.0, 5.0)));
    let inside_square = Segment::Line(LineSegment::new(point(2.0, 2.0), point(8.0, 8.0)));
    let over_triangle = Segment::Line(LineSegment::new(point(15.0, 8.0), point(35.0, 8.0)));
    assert!(h.intersects(&through_square));
    assert!(!h.intersects(&inside_square));
    assert!(!h.intersects(&over_triangle));

    let arch = Segment::Cubic(CubicBezier::new(
        point(22.0, -5.0),
        point(22.0, 10.0),
        point(28.0, 10.0),
        point(28.0, -5.0),
    ));
    assert!(h.intersects(&arch));
}

#[test]
fn parallelograms_separate_on_their_own_axes() {
    // A thin diagonal strip and a square that only its axis-aligned box would touch.
    let strip = Parallelogram::around_points(&[point(0.0, 0.0), point(10.0, 10.0)]);
    let square = Parallelogram::new(point(8.0, 0.0), vector(2.0, 0.0), vector(0.0, 2.0));
    assert!(!strip.intersects(&square));

    let crossing = Parallelogram::around_points(&[point(0.0, 10.0), point(10.0, 0.0)]);
    assert!(strip.intersects(&crossing));
}

#[test]
fn union_covers_both_parallelograms() {
    let a = Parallelogram::new(point(0.0, 0.0), vector(1.0, 0.0), vector(0.0, 1.0));
    let b = Parallelogram::new(point(5.0, 5.0), vector(1.0, 0.0), vector(0.0, 1.0));
    let u = Parallelogram::union(&a, &b);
    for v in a.vertices().into_iter().chain(b.vertices()) {
        let probe = Parallelogram::new(v, vector(0.0, 0.0), vector(0.0, 0.0));
        assert!(u.intersects(&probe));
    }
    let outside = Parallelogram::new(point(7.0, 7.0), vector(1.0, 0.0), vector(0.0, 1.0));
    assert!(!u.intersects(&outside));
}
