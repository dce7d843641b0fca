// Centralized tolerances and helpers for layout and hit-test geometry

pub const EPS_LEN: f32 = 1e-6;            // zero-length vector threshold
pub const EPS_DENOM: f32 = 1e-8;          // denominator guard for parametric solves

// Fixed parametric subdivision used when flattening rendered curves for picking
pub const QUAD_CHORDS: u32 = 3;
pub const CUBIC_CHORDS: u32 = 5;

#[inline] pub fn clamp01(x: f32) -> f32 { x.max(0.0).min(1.0) }

#[inline]
pub fn safe_div(num: f32, den: f32, fallback: f32) -> f32 {
    if den.abs() <= EPS_DENOM { fallback } else { num/den }
}
