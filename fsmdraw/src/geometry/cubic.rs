//! Quadratic and cubic Bézier segments used by connection paths.
//!
//! Curves are evaluated with de Casteljau interpolation; the same routine
//! produces the chords used for click hit-testing.

use crate::geometry::flatten::{de_casteljau, flatten_uniform};
use crate::geometry::point::Point;

/// Control points of a quadratic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBezier {
    pub p0: Point, // Start point
    pub p1: Point, // Control point
    pub p2: Point, // End point
}

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Point, // Start point
    pub p1: Point, // First control point
    pub p2: Point, // Second control point
    pub p3: Point, // End point
}

impl QuadBezier {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn eval(&self, t: f32) -> Point {
        de_casteljau(&[self.p0, self.p1, self.p2], t)
    }

    /// Chord end points at `steps` equal parameter steps, start excluded.
    pub fn chords(&self, steps: u32) -> Vec<Point> {
        let mut pts = Vec::with_capacity(steps as usize);
        flatten_uniform(&mut pts, &[self.p0, self.p1, self.p2], steps);
        pts
    }
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f32) -> Point {
        de_casteljau(&[self.p0, self.p1, self.p2, self.p3], t)
    }

    pub fn chords(&self, steps: u32) -> Vec<Point> {
        let mut pts = Vec::with_capacity(steps as usize);
        flatten_uniform(&mut pts, &[self.p0, self.p1, self.p2, self.p3], steps);
        pts
    }
}
