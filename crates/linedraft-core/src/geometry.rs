//! Geometry helpers for segments, rectangles and marquee hit testing.
//!
//! All functions work in canvas coordinates and never fail: degenerate input
//! (zero-length segments, zero-area rectangles) produces a well-defined answer.

use kurbo::{Line as Segment, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).hypot()
}

/// Implicit line equation `a*x + b*y + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineEquation {
    /// True when both coefficients vanish (the segment is a single point).
    pub fn is_degenerate(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    /// Evaluate the left-hand side at a point. Zero means the point lies on the line.
    pub fn eval(&self, p: Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }
}

/// Build the implicit equation of the infinite line through a segment.
pub fn line_equation(segment: Segment) -> LineEquation {
    let Segment { p0: p1, p1: p2 } = segment;
    let a = p2.y - p1.y;
    let b = -(p2.x - p1.x);
    let c = -a * p1.x - b * p1.y;
    LineEquation { a, b, c }
}

/// Axis-aligned rectangle spanned by two opposite corners, in any order.
pub fn normalized_rect(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Inclusive point-in-rectangle test. The corners may be given in any order.
pub fn point_in_rect(p: Point, a: Point, b: Point) -> bool {
    let r = normalized_rect(a, b);
    // kurbo's Rect::contains excludes the far edges, marquee selection needs them.
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Sign of the turn `a -> b -> c`: 1 clockwise, -1 counter-clockwise, 0 collinear.
fn orientation(a: Point, b: Point, c: Point) -> i8 {
    let v = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Whether `c` lies inside the bounding box of segment `a-b`.
/// Only meaningful once `a`, `b`, `c` are known to be collinear.
fn on_segment(a: Point, b: Point, c: Point) -> bool {
    a.x.min(b.x) <= c.x && c.x <= a.x.max(b.x) && a.y.min(b.y) <= c.y && c.y <= a.y.max(b.y)
}

/// Closed segment intersection test, including touching endpoints and
/// collinear overlap.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, p2, q2))
        || (o3 == 0 && on_segment(q1, q2, p1))
        || (o4 == 0 && on_segment(q1, q2, p2))
}

/// Marquee predicate: a segment hits the rectangle if either endpoint is inside
/// it, or if it crosses any of the four edges.
pub fn line_intersects_rect(segment: Segment, a: Point, b: Point) -> bool {
    if point_in_rect(segment.p0, a, b) || point_in_rect(segment.p1, a, b) {
        return true;
    }

    let r = normalized_rect(a, b);
    let corners = [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ];
    (0..4).any(|i| segments_intersect(segment.p0, segment.p1, corners[i], corners[(i + 1) % 4]))
}

/// Shortest distance from a point to a closed segment.
pub fn distance_to_segment(p: Point, segment: Segment) -> f64 {
    let line_vec: Vec2 = segment.p1 - segment.p0;
    let point_vec: Vec2 = p - segment.p0;

    let len_sq = line_vec.hypot2();
    if len_sq < f64::EPSILON {
        return point_vec.hypot();
    }

    let t = (point_vec.dot(line_vec) / len_sq).clamp(0.0, 1.0);
    let projection = segment.p0 + line_vec * t;
    distance(p, projection)
}
