//! Point and vector aliases plus the handful of scalar predicates the router leans on.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

/// Distance below which two points are treated as the same point.
pub const DISTANCE_EPSILON: f64 = 1e-6;

/// Tolerance used when comparing signed areas against zero.
pub const TOLERANCE: f64 = 1e-8;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn close(a: Point, b: Point) -> bool {
    (a - b).square_length() <= DISTANCE_EPSILON * DISTANCE_EPSILON
}

/// Twice the signed area of the triangle `(a, b, c)`; positive for a counter-clockwise turn.
pub fn signed_doubled_triangle_area(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// `1` for a left (counter-clockwise) turn at `b`, `-1` for a right turn, `0` when flat.
pub fn turn_sign(a: Point, b: Point, c: Point) -> i8 {
    let area = signed_doubled_triangle_area(a, b, c);
    if area > TOLERANCE {
        1
    } else if area < -TOLERANCE {
        -1
    } else {
        0
    }
}

pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    a + (b - a) * t
}

/// `a > b` with a margin of [`DISTANCE_EPSILON`].
pub fn greater_with_epsilon(a: f64, b: f64) -> bool {
    a > b + DISTANCE_EPSILON
}
