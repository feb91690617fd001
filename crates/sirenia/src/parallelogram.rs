//! Oriented parallelogram bounds used to prune curve/boundary intersection tests.

use crate::geom::{Point, Vector, vector};

/// `corner`, `corner + a`, `corner + a + b`, `corner + b`, in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallelogram {
    corner: Point,
    a: Vector,
    b: Vector,
}

impl Parallelogram {
    pub fn new(corner: Point, a: Vector, b: Vector) -> Self {
        Self { corner, a, b }
    }

    /// The tightest rectangle aligned with `first -> last` that holds every point.
    ///
    /// Falls back to the axis-aligned box when the chord is degenerate. Control polygons of
    /// Bezier segments go through here; their convex hull, and therefore the curve, stays inside.
    pub fn around_points(points: &[Point]) -> Self {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Self::new(Point::origin(), Vector::zero(), Vector::zero());
        };
        let chord = last - first;
        let length = chord.length();
        if length <= crate::geom::DISTANCE_EPSILON {
            return Self::axis_aligned(points);
        }
        let along = chord / length;
        let across = vector(-along.y, along.x);

        let mut min_along = 0.0f64;
        let mut max_along = 0.0f64;
        let mut min_across = 0.0f64;
        let mut max_across = 0.0f64;
        for &p in points {
            let d = p - first;
            let s = d.dot(along);
            let t = d.dot(across);
            min_along = min_along.min(s);
            max_along = max_along.max(s);
            min_across = min_across.min(t);
            max_across = max_across.max(t);
        }

        Self::new(
            first + along * min_along + across * min_across,
            along * (max_along - min_along),
            across * (max_across - min_across),
        )
    }

    pub fn axis_aligned(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self::new(Point::origin(), Vector::zero(), Vector::zero());
        }
        let mut min = vector(f64::INFINITY, f64::INFINITY);
        let mut max = vector(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self::new(
            min.to_point(),
            vector(max.x - min.x, 0.0),
            vector(0.0, max.y - min.y),
        )
    }

    /// A parallelogram covering both `p` and `q`.
    pub fn union(p: &Self, q: &Self) -> Self {
        let mut vertices = Vec::with_capacity(8);
        vertices.extend_from_slice(&p.vertices());
        vertices.extend_from_slice(&q.vertices());
        Self::axis_aligned(&vertices)
    }

    pub fn vertices(&self) -> [Point; 4] {
        [
            self.corner,
            self.corner + self.a,
            self.corner + self.a + self.b,
            self.corner + self.b,
        ]
    }

    pub fn center(&self) -> Point {
        self.corner + (self.a + self.b) * 0.5
    }

    /// Separating-axis overlap test. Touching counts as overlapping.
    pub fn intersects(&self, other: &Self) -> bool {
        let axes = [
            vector(1.0, 0.0),
            vector(0.0, 1.0),
            vector(-self.a.y, self.a.x),
            vector(-self.b.y, self.b.x),
            vector(-other.a.y, other.a.x),
            vector(-other.b.y, other.b.x),
        ];
        let mine = self.vertices();
        let theirs = other.vertices();
        for axis in axes {
            if axis.square_length() <= f64::EPSILON {
                continue;
            }
            let (lo0, hi0) = project(&mine, axis);
            let (lo1, hi1) = project(&theirs, axis);
            let slack = crate::geom::DISTANCE_EPSILON * axis.length();
            if hi0 + slack < lo1 || hi1 + slack < lo0 {
                return false;
            }
        }
        true
    }
}

fn project(vertices: &[Point; 4], axis: Vector) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in vertices {
        let d = v.to_vector().dot(axis);
        lo = lo.min(d);
        hi = hi.max(d);
    }
    (lo, hi)
}
