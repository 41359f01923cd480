//! Drag propagation across lattice bundles.
//!
//! A moved user point shifts the unpinned corners of its quad in the live,
//! rest and expand lattices. When the point carries other lattices, every
//! control and user point of those lattices (all six layers) shifts by the
//! same delta. Propagation is one level deep; the carries graph is checked
//! for cycles when the scene is built, not here.

use crate::bundle::LatticeBundle;
use crate::model::{LatticeId, Vec2};

/// Who is moving a user point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// Pointer edit: the delta is mirrored into the point's own keyframes.
    Pointer,
    /// Keyframe playback: the user snapshots are the keyframes and stay put.
    Keyframe,
}

/// Move user point `(row, col)` of lattice `id` to `(x, y)`. Returns the applied delta.
pub fn move_user_point_impl(
    bundles: &mut [LatticeBundle],
    id: LatticeId,
    row: usize,
    col: usize,
    x: f32,
    y: f32,
    source: DragSource,
) -> Option<Vec2> {
    let b = bundles.get_mut(id as usize)?;
    if !b.user_live.in_bounds(row, col) {
        return None;
    }
    let up = b.user_live.at_mut(row, col);
    let dx = x - up.x;
    let dy = y - up.y;
    up.x = x;
    up.y = y;
    let carries = up.carries.clone();
    if source == DragSource::Pointer {
        b.user_rest.at_mut(row, col).translate(dx, dy);
        b.user_expand.at_mut(row, col).translate(dx, dy);
    }
    b.shift_quad(row, col, dx, dy);
    carry(bundles, id, &carries, dx, dy);
    Some(Vec2 { x: dx, y: dy })
}

/// Place control point `(row, col)` of lattice `id` at `(x, y)`, mirroring the
/// delta into both keyframes. Pinned points refuse and return `None`.
pub fn move_control_point_impl(
    bundles: &mut [LatticeBundle],
    id: LatticeId,
    row: usize,
    col: usize,
    x: f32,
    y: f32,
) -> Option<Vec2> {
    let b = bundles.get_mut(id as usize)?;
    let cp = b.live.get_mut(row, col)?;
    if cp.pinned {
        return None;
    }
    let dx = x - cp.x;
    let dy = y - cp.y;
    cp.x = x;
    cp.y = y;
    let carries = cp.carries.clone();
    b.rest.at_mut(row, col).translate(dx, dy);
    b.expand.at_mut(row, col).translate(dx, dy);
    carry(bundles, id, &carries, dx, dy);
    Some(Vec2 { x: dx, y: dy })
}

fn carry(bundles: &mut [LatticeBundle], from: LatticeId, carries: &[LatticeId], dx: f32, dy: f32) {
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    for (k, &dep) in carries.iter().enumerate() {
        // repeated ids move their lattice once
        if dep == from || carries[..k].contains(&dep) {
            continue;
        }
        if let Some(d) = bundles.get_mut(dep as usize) {
            d.translate_all(dx, dy);
        }
    }
}
