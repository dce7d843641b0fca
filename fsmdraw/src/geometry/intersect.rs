// Line segments: length, midpoint, parametric intersection and point distance.

use super::point::Point;
use super::tolerance::{clamp01, EPS_DENOM};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    pub fn midpoint(&self) -> Point {
        self.a.midpoint(self.b)
    }

    /// Intersection point of two segments.
    ///
    /// Solves `a + t·r = c + u·s` and reports a point only when both `t` and
    /// `u` lie in `[0, 1]`, so crossings of the infinite extensions are
    /// ignored. Parallel and collinear pairs (zero denominator) report `None`.
    pub fn intersection(&self, other: &Segment) -> Option<Point> {
        let r = self.b - self.a;
        let s = other.b - other.a;
        let rxs = r.cross(s);
        if rxs.abs() <= EPS_DENOM {
            return None;
        }
        let qp = other.a - self.a;
        let t = qp.cross(s) / rxs;
        let u = qp.cross(r) / rxs;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.a + r * t)
        } else {
            None
        }
    }

    /// Squared distance from `p` to the closest point of the segment, and the
    /// parameter of that closest point. Zero-length segments measure to `a`.
    pub fn distance_sq(&self, p: Point) -> (f32, f32) {
        let v = self.b - self.a;
        let w = p - self.a;
        let vv = v.dot(v);
        let t = if vv > 0.0 { clamp01(w.dot(v) / vv) } else { 0.0 };
        let proj = self.a + v * t;
        (p.distance_sq(proj), t)
    }
}
