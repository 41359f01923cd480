use crate::bundle::LatticeBundle;
use crate::geometry::math::dist_sq;
use crate::model::{LatticeId, PointKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub kind: PointKind,
    pub lattice: LatticeId,
    pub row: usize,
    pub col: usize,
    pub dist: f32,
}

/// First point strictly closer than `radius` to `(x, y)`.
///
/// Control points of every lattice are scanned before any user point;
/// lattices go in registration order and points in row-major order.
pub fn hit_test_impl(bundles: &[LatticeBundle], x: f32, y: f32, radius: f32) -> Option<Hit> {
    let r2 = radius * radius;
    // Control points first
    for b in bundles {
        for (row, col, p) in b.live.iter() {
            let d2 = dist_sq(p.x, p.y, x, y);
            if d2 < r2 { return Some(Hit { kind: PointKind::Control, lattice: b.id, row, col, dist: d2.sqrt() }); }
        }
    }
    for b in bundles {
        for (row, col, p) in b.user_live.iter() {
            let d2 = dist_sq(p.x, p.y, x, y);
            if d2 < r2 { return Some(Hit { kind: PointKind::User, lattice: b.id, row, col, dist: d2.sqrt() }); }
        }
    }
    None
}
