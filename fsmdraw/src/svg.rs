use crate::geometry::spline::{Path, PathSeg};
use crate::Diagram;

/// SVG path data for one connection path.
pub fn path_d(path: &Path) -> String {
    let mut d = format!("M {} {}", path.start.x, path.start.y);
    for seg in &path.segments {
        match *seg {
            PathSeg::Line { to } => d.push_str(&format!(" L {} {}", to.x, to.y)),
            PathSeg::Quad { ctrl, to } => d.push_str(&format!(" Q {} {}, {} {}", ctrl.x, ctrl.y, to.x, to.y)),
            PathSeg::Cubic { c1, c2, to } => {
                d.push_str(&format!(" C {} {}, {} {}, {} {}", c1.x, c1.y, c2.x, c2.y, to.x, to.y))
            }
        }
    }
    d
}

/// One path per arrow, in arrow order. Always a full redraw.
pub fn to_svg_paths_impl(d: &Diagram) -> Vec<String> {
    d.connections().iter().map(|c| path_d(&c.path)).collect()
}
