// Shared constants for curve normalization

// Heart extent: max |x| and |y| of the unscaled curve fit in 34 units
pub const DEFAULT_NORM_SCALE: f32 = 34.0;

#[inline] pub fn clamp01(x: f32) -> f32 { x.max(0.0).min(1.0) }
