//! Geometry of the arrows drawn between states.
//!
//! A connection is reduced to an ordered point list (straight, bowed or
//! self-loop) that `build_path` turns into a smooth path. Repeated edges
//! between the same pair of states are told apart by an occurrence index so
//! they fan out instead of overlapping.

use crate::config::Config;
use crate::geometry::cubic::{CubicBezier, QuadBezier};
use crate::geometry::intersect::Segment;
use crate::geometry::point::Point;
use crate::geometry::spline::{build_path, path_contains, Path, PathSeg};
use crate::geometry::tolerance::EPS_LEN;
use crate::model::State;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionGeometry {
    pub source: Point,
    pub target: Point,
    pub occurrence: u32,
    pub cycle: bool,
    pub bidirectional: bool,
}

impl ConnectionGeometry {
    pub fn points(&self, config: &Config) -> Vec<Point> {
        connection_geometry(self.source, self.target, self.occurrence, self.cycle, self.bidirectional, config)
    }
}

/// Ordered points for one connection, ready for `build_path`.
pub fn connection_geometry(
    source: Point,
    target: Point,
    occurrence: u32,
    cycle: bool,
    bidirectional: bool,
    config: &Config,
) -> Vec<Point> {
    if cycle {
        return self_loop(source, target, occurrence, config);
    }
    let bow = if bidirectional {
        config.bow * (occurrence + 1) as f32
    } else {
        config.bow * occurrence as f32
    };
    if bow == 0.0 || source.distance(target) <= EPS_LEN {
        return vec![source, target];
    }
    // Offset along the left-hand normal of the travel direction; the
    // opposite edge travels the other way and bows to the other side.
    let theta = (target.y - source.y).atan2(target.x - source.x);
    let normal = Point::new(theta.sin(), -theta.cos());
    vec![source, source.midpoint(target) + normal * bow, target]
}

fn self_loop(source: Point, target: Point, occurrence: u32, config: &Config) -> Vec<Point> {
    let lift = config.loop_height + occurrence as f32 * config.loop_spread;
    let spread = config.loop_spread * (occurrence + 1) as f32;
    let top = source.y.min(target.y);
    let apex = Point::new(source.midpoint(target).x, top - lift);
    vec![
        source,
        Point::new(source.x - spread, top - lift * 0.75),
        apex,
        Point::new(target.x + spread, top - lift * 0.75),
        target,
    ]
}

/// Point on the border of `state` where a line from its centre towards
/// `toward` leaves the box. Falls back to the centre when `toward` is inside.
pub fn anchor(state: &State, toward: Point) -> Point {
    let c = state.center();
    if state.contains(toward) {
        return c;
    }
    let ray = Segment::new(c, toward);
    let (x0, y0) = (state.x, state.y);
    let (x1, y1) = (state.x + state.width, state.y + state.height);
    let sides = [
        Segment::new(Point::new(x0, y0), Point::new(x1, y0)),
        Segment::new(Point::new(x1, y0), Point::new(x1, y1)),
        Segment::new(Point::new(x1, y1), Point::new(x0, y1)),
        Segment::new(Point::new(x0, y1), Point::new(x0, y0)),
    ];
    sides.iter().find_map(|side| ray.intersection(side)).unwrap_or(c)
}

/// Anchors of a self-loop: two points on the top border, a quarter width
/// either side of the centre.
pub fn loop_anchors(state: &State) -> (Point, Point) {
    let cx = state.x + state.width * 0.5;
    let q = state.width * 0.25;
    (Point::new(cx - q, state.y), Point::new(cx + q, state.y))
}

/// Counts rendered edges per unordered state pair.
#[derive(Debug, Default)]
pub struct OccurrenceCounter {
    seen: HashMap<(u32, u32), u32>,
}

impl OccurrenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrence index for the next edge between `a` and `b` (either
    /// direction), counting it as rendered.
    pub fn next(&mut self, a: u32, b: u32) -> u32 {
        let key = if a <= b { (a, b) } else { (b, a) };
        let slot = self.seen.entry(key).or_insert(0);
        let idx = *slot;
        *slot += 1;
        idx
    }
}

/// Axis-aligned label box, centre anchored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LabelBox {
    pub center: Point,
    pub width: f32,
    pub height: f32,
}

impl LabelBox {
    pub fn contains(&self, p: Point) -> bool {
        (p.x - self.center.x).abs() <= self.width * 0.5 && (p.y - self.center.y).abs() <= self.height * 0.5
    }
}

/// A fully resolved, drawable connection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Connection {
    pub arrow: u32,
    pub points: Vec<Point>,
    pub path: Path,
    pub label: Option<LabelBox>,
}

impl Connection {
    pub fn new(arrow: u32, geometry: ConnectionGeometry, label: Option<&str>, config: &Config) -> Self {
        let points = geometry.points(config);
        let path = build_path(&points, config.tension);
        let label = label.filter(|l| !l.is_empty()).map(|text| LabelBox {
            center: label_anchor(&path),
            width: text.chars().count() as f32 * config.label_char_width,
            height: config.label_height,
        });
        Connection { arrow, points, path, label }
    }

    /// Hit test against the curve, or the label box when there is one.
    pub fn contains(&self, p: Point, tolerance: f32) -> bool {
        path_contains(&self.path, p, tolerance) || self.label.map_or(false, |b| b.contains(p))
    }
}

/// Middle of the path: the end of the middle segment for an even number of
/// segments, the midpoint of the middle segment otherwise.
fn label_anchor(path: &Path) -> Point {
    let n = path.segments.len();
    if n == 0 {
        return path.start;
    }
    if n % 2 == 0 {
        return path.segments[n / 2 - 1].end();
    }
    let i = n / 2;
    let from = if i == 0 { path.start } else { path.segments[i - 1].end() };
    match path.segments[i] {
        PathSeg::Line { to } => from.midpoint(to),
        PathSeg::Quad { ctrl, to } => QuadBezier::new(from, ctrl, to).eval(0.5),
        PathSeg::Cubic { c1, c2, to } => CubicBezier::new(from, c1, c2, to).eval(0.5),
    }
}
