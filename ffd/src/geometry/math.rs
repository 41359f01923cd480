use crate::model::Vec2;

#[inline]
pub fn dist_sq(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx; let dy = ay - by;
    dx*dx + dy*dy
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 { (1.0 - t) * a + t * b }

#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: (a.x + b.x) / 2.0, y: (a.y + b.y) / 2.0 }
}

/// Reflect `p` through `center` (a 180° rotation).
#[inline]
pub fn half_turn(p: Vec2, center: Vec2) -> Vec2 {
    Vec2 { x: 2.0 * center.x - p.x, y: 2.0 * center.y - p.y }
}
