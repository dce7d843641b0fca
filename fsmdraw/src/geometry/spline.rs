//! Smooth connection paths through an ordered list of points.
//!
//! Interior points get a pair of control points from a Catmull-Rom style
//! tension rule, which keeps the tangent direction continuous at every point
//! the path passes through. A path of `n >= 3` points is drawn as a
//! quadratic lead-in, `n - 3` cubic segments and a quadratic lead-out.

use crate::geometry::cubic::{CubicBezier, QuadBezier};
use crate::geometry::intersect::Segment;
use crate::geometry::point::Point;
use crate::geometry::tolerance::{safe_div, CUBIC_CHORDS, QUAD_CHORDS};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PathSeg {
    Line { to: Point },
    Quad { ctrl: Point, to: Point },
    Cubic { c1: Point, c2: Point, to: Point },
}

impl PathSeg {
    pub fn end(&self) -> Point {
        match *self {
            PathSeg::Line { to } | PathSeg::Quad { to, .. } | PathSeg::Cubic { to, .. } => to,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub start: Point,
    pub segments: Vec<PathSeg>,
}

impl Path {
    /// Chord vertices approximating the path: quadratic segments in thirds,
    /// cubic segments in fifths, lines as-is.
    pub fn flatten(&self) -> Vec<Point> {
        let mut pts = vec![self.start];
        let mut cur = self.start;
        for seg in &self.segments {
            match *seg {
                PathSeg::Line { to } => pts.push(to),
                PathSeg::Quad { ctrl, to } => pts.extend(QuadBezier::new(cur, ctrl, to).chords(QUAD_CHORDS)),
                PathSeg::Cubic { c1, c2, to } => pts.extend(CubicBezier::new(cur, c1, c2, to).chords(CUBIC_CHORDS)),
            }
            cur = seg.end();
        }
        pts
    }

    /// Every control and end point of the path, in drawing order.
    pub fn control_points(&self) -> Vec<Point> {
        let mut pts = vec![self.start];
        for seg in &self.segments {
            match *seg {
                PathSeg::Line { to } => pts.push(to),
                PathSeg::Quad { ctrl, to } => pts.extend([ctrl, to]),
                PathSeg::Cubic { c1, c2, to } => pts.extend([c1, c2, to]),
            }
        }
        pts
    }
}

/// Control points on either side of `p2` for the triple `p1, p2, p3`.
///
/// Both lie on the line through `p2` parallel to `p3 - p1`; their distance
/// from `p2` is `tension` scaled by the share of the neighbouring leg length.
pub fn control_points(p1: Point, p2: Point, p3: Point, tension: f32) -> (Point, Point) {
    let d01 = p1.distance(p2);
    let d12 = p2.distance(p3);
    let sum = d01 + d12;
    let fa = tension * safe_div(d01, sum, 0.0);
    let fb = tension * safe_div(d12, sum, 0.0);
    let v = p3 - p1;
    (p2 - v * fa, p2 + v * fb)
}

/// Build a drawable path through `points`.
///
/// Fewer than two points give an empty path, two points a straight line.
pub fn build_path(points: &[Point], tension: f32) -> Path {
    let start = points.first().copied().unwrap_or(Point::ORIGIN);
    let mut segments = Vec::new();
    match points.len() {
        0 | 1 => {}
        2 => segments.push(PathSeg::Line { to: points[1] }),
        n => {
            // (left, right) control pair of every interior point
            let ctrl: Vec<(Point, Point)> = points
                .windows(3)
                .map(|w| control_points(w[0], w[1], w[2], tension))
                .collect();
            segments.push(PathSeg::Quad { ctrl: ctrl[0].0, to: points[1] });
            for i in 1..n - 2 {
                segments.push(PathSeg::Cubic { c1: ctrl[i - 1].1, c2: ctrl[i].0, to: points[i + 1] });
            }
            segments.push(PathSeg::Quad { ctrl: ctrl[n - 3].1, to: points[n - 1] });
        }
    }
    Path { start, segments }
}

/// Whether `p` lies within `tolerance` of the flattened path.
///
/// A negative or non-finite tolerance never hits.
pub fn path_contains(path: &Path, p: Point, tolerance: f32) -> bool {
    if !(tolerance.is_finite() && tolerance >= 0.0) {
        return false;
    }
    nearest_chord_distance_sq(path, p).map_or(false, |d2| d2 <= tolerance * tolerance)
}

/// Squared distance from `p` to the closest chord of the flattened path.
pub fn nearest_chord_distance_sq(path: &Path, p: Point) -> Option<f32> {
    path.flatten()
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]).distance_sq(p).0)
        .fold(None, |best: Option<f32>, d2| Some(best.map_or(d2, |b| b.min(d2))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn two_points_make_a_line() {
        let path = build_path(&[pt(0.0, 0.0), pt(100.0, 0.0)], 0.5);
        assert_eq!(path.segments, vec![PathSeg::Line { to: pt(100.0, 0.0) }]);
        assert!(path_contains(&path, pt(40.0, 0.0), 5.0));
        assert!(path_contains(&path, pt(40.0, 4.9), 5.0));
        assert!(!path_contains(&path, pt(40.0, 5.5), 5.0));
    }

    #[test]
    fn negative_tolerance_never_hits() {
        let path = build_path(&[pt(0.0, 0.0), pt(100.0, 0.0)], 0.5);
        assert!(!path_contains(&path, pt(50.0, 4.0), -5.0));
        assert!(!path_contains(&path, pt(50.0, 0.0), f32::NAN));
        assert!(path_contains(&path, pt(50.0, 0.0), 0.0));
    }

    #[test]
    fn empty_path_contains_nothing() {
        let path = build_path(&[], 0.5);
        assert!(path.segments.is_empty());
        assert!(!path_contains(&path, Point::ORIGIN, 10.0));
    }

    #[test]
    fn segment_shape_for_five_points() {
        let pts = [pt(0.0, 0.0), pt(10.0, -10.0), pt(20.0, -15.0), pt(30.0, -10.0), pt(40.0, 0.0)];
        let path = build_path(&pts, 0.5);
        assert_eq!(path.segments.len(), 4);
        assert!(matches!(path.segments[0], PathSeg::Quad { .. }));
        assert!(matches!(path.segments[1], PathSeg::Cubic { .. }));
        assert!(matches!(path.segments[2], PathSeg::Cubic { .. }));
        assert!(matches!(path.segments[3], PathSeg::Quad { .. }));
        for (seg, want) in path.segments.iter().zip(&pts[1..]) {
            assert_eq!(seg.end(), *want);
        }
        // 3 + 5 + 5 + 3 chords
        assert_eq!(path.flatten().len(), 17);
    }

    #[test]
    fn controls_are_collinear_with_anchor() {
        let (l, r) = control_points(pt(0.0, 0.0), pt(10.0, 10.0), pt(20.0, 0.0), 0.5);
        // p3 - p1 is horizontal, so both controls share p2's y
        assert!((l.y - 10.0).abs() < 1e-6 && (r.y - 10.0).abs() < 1e-6);
        assert!((l.x - 5.0).abs() < 1e-5 && (r.x - 15.0).abs() < 1e-5);
    }

    #[test]
    fn coincident_triple_collapses_controls() {
        let p = pt(3.0, 4.0);
        assert_eq!(control_points(p, p, p, 0.5), (p, p));
    }

    #[test]
    fn curve_passes_through_interior_points() {
        let path = build_path(&[pt(0.0, 0.0), pt(50.0, -40.0), pt(100.0, 0.0)], 0.5);
        assert!(path_contains(&path, pt(50.0, -40.0), 0.5));
        assert!(!path_contains(&path, pt(50.0, 0.0), 5.0));
    }
}
