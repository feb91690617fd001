//! Curve primitives: straight segments, cubic Beziers, polylines and the routed `Curve`.

use crate::geom::{self, Point};
use crate::parallelogram::Parallelogram;
use serde::{Deserialize, Serialize};

/// Subdivision stops once the control points are this close to the chord.
const FLATNESS: f64 = 1e-3;
const MAX_SUBDIVISION_DEPTH: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn parallelogram(&self) -> Parallelogram {
        Parallelogram::around_points(&[self.start, self.end])
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    /// Closed-segment intersection. Collinear overlaps report the first shared point.
    pub fn intersection(&self, other: &LineSegment) -> Option<Point> {
        let r = self.end - self.start;
        let s = other.end - other.start;
        let qp = other.start - self.start;
        let denom = r.cross(s);
        let eps = geom::TOLERANCE;

        if denom.abs() <= eps * (r.length() * s.length()).max(1.0) {
            if qp.cross(r).abs() > eps * r.length().max(1.0) {
                return None;
            }
            return collinear_overlap(self, other);
        }

        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        let slack = geom::DISTANCE_EPSILON;
        let t_slack = slack / r.length().max(slack);
        let u_slack = slack / s.length().max(slack);
        if t < -t_slack || t > 1.0 + t_slack || u < -u_slack || u > 1.0 + u_slack {
            return None;
        }
        Some(self.start + r * t.clamp(0.0, 1.0))
    }
}

fn collinear_overlap(a: &LineSegment, b: &LineSegment) -> Option<Point> {
    let dir = a.end - a.start;
    let len2 = dir.square_length();
    if len2 <= f64::EPSILON {
        let d = b.end - b.start;
        let d2 = d.square_length();
        if d2 <= f64::EPSILON {
            return geom::close(a.start, b.start).then_some(a.start);
        }
        let t = (a.start - b.start).dot(d) / d2;
        return (-geom::TOLERANCE..=1.0 + geom::TOLERANCE)
            .contains(&t)
            .then_some(a.start);
    }
    let t0 = (b.start - a.start).dot(dir) / len2;
    let t1 = (b.end - a.start).dot(dir) / len2;
    let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
    let lo = lo.max(0.0);
    let hi = hi.min(1.0);
    (lo <= hi + geom::TOLERANCE).then(|| a.start + dir * lo)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub points: [Point; 4],
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[3]
    }

    pub fn point_at(&self, t: f64) -> Point {
        let [p0, p1, p2, p3] = self.points;
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        geom::point(
            a * p0.x + b * p1.x + c * p2.x + d * p3.x,
            a * p0.y + b * p1.y + c * p2.y + d * p3.y,
        )
    }

    /// de Casteljau split at `t`.
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let [p0, p1, p2, p3] = self.points;
        let q0 = geom::lerp(p0, p1, t);
        let q1 = geom::lerp(p1, p2, t);
        let q2 = geom::lerp(p2, p3, t);
        let r0 = geom::lerp(q0, q1, t);
        let r1 = geom::lerp(q1, q2, t);
        let s = geom::lerp(r0, r1, t);
        (
            CubicBezier::new(p0, q0, r0, s),
            CubicBezier::new(s, r1, q2, p3),
        )
    }

    pub fn parallelogram(&self) -> Parallelogram {
        Parallelogram::around_points(&self.points)
    }

    fn is_flat(&self) -> bool {
        let [p0, p1, p2, p3] = self.points;
        let chord = p3 - p0;
        let len = chord.length();
        if len <= geom::DISTANCE_EPSILON {
            return (p1 - p0).length() <= FLATNESS && (p2 - p0).length() <= FLATNESS;
        }
        let d1 = chord.cross(p1 - p0).abs() / len;
        let d2 = chord.cross(p2 - p0).abs() / len;
        d1.max(d2) <= FLATNESS
    }

    pub fn intersects_line(&self, line: &LineSegment) -> bool {
        self.intersects_line_at_depth(line, &line.parallelogram(), 0)
    }

    fn intersects_line_at_depth(
        &self,
        line: &LineSegment,
        bound: &Parallelogram,
        depth: u32,
    ) -> bool {
        if !self.parallelogram().intersects(bound) {
            return false;
        }
        if depth >= MAX_SUBDIVISION_DEPTH || self.is_flat() {
            return LineSegment::new(self.start(), self.end())
                .intersection(line)
                .is_some();
        }
        let (left, right) = self.split(0.5);
        left.intersects_line_at_depth(line, bound, depth + 1)
            || right.intersects_line_at_depth(line, bound, depth + 1)
    }
}

/// One piece of a routed curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Line(LineSegment),
    Cubic(CubicBezier),
}

impl Segment {
    pub fn start(&self) -> Point {
        match self {
            Segment::Line(l) => l.start,
            Segment::Cubic(c) => c.start(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line(l) => l.end,
            Segment::Cubic(c) => c.end(),
        }
    }

    pub fn parallelogram(&self) -> Parallelogram {
        match self {
            Segment::Line(l) => l.parallelogram(),
            Segment::Cubic(c) => c.parallelogram(),
        }
    }

    /// Whether this segment touches the straight boundary piece `line`.
    pub fn intersects_line(&self, line: &LineSegment) -> bool {
        match self {
            Segment::Line(l) => l.intersection(line).is_some(),
            Segment::Cubic(c) => c.intersects_line(line),
        }
    }

    pub fn reversed(&self) -> Segment {
        match self {
            Segment::Line(l) => Segment::Line(LineSegment::new(l.end, l.start)),
            Segment::Cubic(c) => {
                let [p0, p1, p2, p3] = c.points;
                Segment::Cubic(CubicBezier::new(p3, p2, p1, p0))
            }
        }
    }
}

impl From<LineSegment> for Segment {
    fn from(value: LineSegment) -> Self {
        Segment::Line(value)
    }
}

impl From<CubicBezier> for Segment {
    fn from(value: CubicBezier) -> Self {
        Segment::Cubic(value)
    }
}

/// A polygonal boundary. Closed polylines connect the last point back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        let n = self.points.len();
        let count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (2, _) => 1,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..count).map(move |i| LineSegment::new(self.points[i], self.points[(i + 1) % n]))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The routed curve: consecutive segments sharing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    segments: Vec<Segment>,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(Segment::start)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(Segment::end)
    }

    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    pub fn push_front(&mut self, segment: impl Into<Segment>) {
        self.segments.insert(0, segment.into());
    }

    /// Appends `segment`, bridging any gap from the current end with a straight piece.
    pub fn push_connected(&mut self, segment: impl Into<Segment>) {
        let segment = segment.into();
        if let Some(end) = self.end() {
            if !geom::close(end, segment.start()) {
                self.segments
                    .push(Segment::Line(LineSegment::new(end, segment.start())));
            }
        }
        self.segments.push(segment);
    }

    pub fn reversed(&self) -> Curve {
        Curve {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }

    pub fn count_cubics(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Cubic(_)))
            .count()
    }
}
