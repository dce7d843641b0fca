use crate::geometry::point::Point;

/// Evaluate a Bézier control polygon at `t` by repeated linear interpolation.
///
/// Each level lerps neighbouring points until one remains; works for any
/// degree, so quadratic and cubic segments share the same code path.
pub fn de_casteljau(ctrl: &[Point], t: f32) -> Point {
    match ctrl {
        [] => Point::ORIGIN,
        [p] => *p,
        _ => {
            let reduced: Vec<Point> = ctrl.windows(2).map(|w| w[0].lerp(w[1], t)).collect();
            de_casteljau(&reduced, t)
        }
    }
}

/// Append the chord end points of `ctrl` sampled at `steps` equal parameter
/// steps. The start point is not pushed; callers seed it once per path.
pub fn flatten_uniform(points: &mut Vec<Point>, ctrl: &[Point], steps: u32) {
    let steps = steps.max(1);
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        points.push(de_casteljau(ctrl, t));
    }
}
