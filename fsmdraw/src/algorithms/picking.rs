use crate::geometry::point::Point;
use crate::geometry::spline::nearest_chord_distance_sq;
use crate::{Diagram, Pick};

/// Resolve a click at surface position `(x, y)`.
///
/// States win over arrows; among overlapping states the most recently added
/// is on top. Among arrows the closest chord wins, a label hit counting as
/// distance zero.
pub fn pick_impl(d: &Diagram, x: f32, y: f32, tol: f32) -> Option<Pick> {
    let p = Point::new(x, y);
    if !p.is_finite() {
        return None;
    }
    let tol = if tol.is_finite() && tol >= 0.0 { tol } else { d.config.hit_tolerance };
    let logical = d.config.from_surface(p);
    if let Some(id) = d.states.iter().rposition(|s| s.contains(logical)) {
        return Some(Pick::State { id: id as u32 });
    }
    let mut best: Option<(u32, f32)> = None;
    for c in d.connections() {
        if !c.contains(p, tol) {
            continue;
        }
        let on_label = c.label.map_or(false, |b| b.contains(p));
        let d2 = if on_label { 0.0 } else { nearest_chord_distance_sq(&c.path, p).unwrap_or(f32::INFINITY) };
        if best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((c.arrow, d2));
        }
    }
    best.map(|(id, d2)| Pick::Arrow { id, dist: d2.sqrt() })
}
