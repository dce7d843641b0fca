// Global caps and numeric bounds for diagram ingestion

// Structural caps
pub const MAX_STATES: usize = 50_000;
pub const MAX_ARROWS: usize = 200_000;
pub const MAX_KEY_LEN: usize = 1_024;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;
pub const SIZE_MAX: f32 = 100_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_size_bounds(w: f32) -> bool { w.is_finite() && w > 0.0 && w <= SIZE_MAX }
