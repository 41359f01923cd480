use crate::error::Result;
use crate::lattice::{Lattice, Region, UserLayer};
use crate::model::{LatticeId, Vec2};
use serde::{Deserialize, Serialize};

/// Outward border offsets applied to the expand snapshot, scaled by the
/// engine's expansion shift.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breathing {
    pub x_factor: f32,
    pub y_factor: f32,
}

/// Live lattice, its two keyframe snapshots and the matching user layers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeBundle {
    pub id: LatticeId,
    pub name: String,
    pub region: Region,
    pub live: Lattice,
    pub rest: Lattice,
    pub expand: Lattice,
    pub user_live: UserLayer,
    pub user_rest: UserLayer,
    pub user_expand: UserLayer,
    pub breathing: Option<Breathing>,
    pub visible: bool,
}

impl LatticeBundle {
    pub fn new(id: LatticeId, name: impl Into<String>, rows: usize, cols: usize, region: Region) -> Result<Self> {
        let live = Lattice::over(rows, cols, region)?;
        let user = UserLayer::from_lattice(&live);
        Ok(Self {
            id,
            name: name.into(),
            region,
            rest: live.clone(),
            expand: live.clone(),
            live,
            user_rest: user.clone(),
            user_expand: user.clone(),
            user_live: user,
            breathing: None,
            visible: true,
        })
    }

    /// Every lattice this bundle's control or user points carry, deduplicated, in first-seen order.
    pub fn carried(&self) -> Vec<LatticeId> {
        let mut out: Vec<LatticeId> = Vec::new();
        let ctrl = self.live.points().iter().flat_map(|p| p.carries.iter());
        let user = self.user_live.points().iter().flat_map(|p| p.carries.iter());
        for &id in ctrl.chain(user) {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }

    /// Shift every control and user point of all six layers.
    pub fn translate_all(&mut self, dx: f32, dy: f32) {
        self.live.translate(dx, dy);
        self.rest.translate(dx, dy);
        self.expand.translate(dx, dy);
        self.user_live.translate(dx, dy);
        self.user_rest.translate(dx, dy);
        self.user_expand.translate(dx, dy);
    }

    /// Shift the unpinned corners of quad `(row, col)` in live, rest and expand.
    pub(crate) fn shift_quad(&mut self, row: usize, col: usize, dx: f32, dy: f32) {
        for (i, j) in [(row, col), (row, col + 1), (row + 1, col), (row + 1, col + 1)] {
            if self.live.at(i, j).pinned {
                continue;
            }
            self.live.at_mut(i, j).translate(dx, dy);
            self.rest.at_mut(i, j).translate(dx, dy);
            self.expand.at_mut(i, j).translate(dx, dy);
        }
    }

    pub fn set_pinned(&mut self, row: usize, col: usize, pinned: bool) -> bool {
        match self.live.get_mut(row, col) {
            Some(p) => {
                p.pinned = pinned;
                true
            }
            None => false,
        }
    }

    pub fn pin_row(&mut self, row: usize) -> bool {
        if row >= self.live.rows() {
            return false;
        }
        for j in 0..self.live.cols() {
            self.live.at_mut(row, j).pinned = true;
        }
        true
    }

    /// Repeated ids are kept once.
    pub fn set_user_carries(&mut self, row: usize, col: usize, carries: Vec<LatticeId>) -> bool {
        if !self.user_live.in_bounds(row, col) {
            return false;
        }
        self.user_live.at_mut(row, col).carries = dedup_ids(carries);
        true
    }

    /// Repeated ids are kept once.
    pub fn set_control_carries(&mut self, row: usize, col: usize, carries: Vec<LatticeId>) -> bool {
        match self.live.get_mut(row, col) {
            Some(p) => {
                p.carries = dedup_ids(carries);
                true
            }
            None => false,
        }
    }

    /// Push the expand snapshot's borders outward by `amount` scaled by the breathing factors.
    ///
    /// "Outward" follows the rest lattice's orientation, so a half-turned bundle still grows.
    pub fn apply_breathing(&mut self, amount: f32) {
        let Some(b) = self.breathing else { return };
        let rows = self.expand.rows();
        let cols = self.expand.cols();
        let sx = if self.rest.at(0, cols - 1).x >= self.rest.at(0, 0).x { 1.0 } else { -1.0 };
        let sy = if self.rest.at(rows - 1, 0).y >= self.rest.at(0, 0).y { 1.0 } else { -1.0 };
        let ax = amount * b.x_factor * sx;
        let ay = amount * b.y_factor * sy;
        for i in 0..rows {
            self.expand.at_mut(i, 0).x -= ax;
            self.expand.at_mut(i, cols - 1).x += ax;
        }
        for j in 0..cols {
            self.expand.at_mut(0, j).y -= ay;
            self.expand.at_mut(rows - 1, j).y += ay;
        }
    }

    /// Rotate all snapshots 180° about the live lattice's diagonal midpoint.
    pub fn rotate_half_turn(&mut self) {
        let c: Vec2 = self.live.center();
        self.live.rotate_half_turn(c);
        self.rest.rotate_half_turn(c);
        self.expand.rotate_half_turn(c);
        self.user_live.rotate_half_turn(c);
        self.user_rest.rotate_half_turn(c);
        self.user_expand.rotate_half_turn(c);
    }

    /// Overwrite both keyframes with the current live positions.
    pub fn capture_keyframes(&mut self) {
        self.rest.copy_positions_from(&self.live);
        self.expand.copy_positions_from(&self.live);
        self.user_rest.copy_positions_from(&self.user_live);
        self.user_expand.copy_positions_from(&self.user_live);
    }

    /// Reset to an evenly spaced `rows × cols` grid over the original region.
    /// Pins, carries and keyframe offsets are dropped.
    pub fn rebuild(&mut self, rows: usize, cols: usize) -> Result<()> {
        let fresh = LatticeBundle::new(self.id, self.name.clone(), rows, cols, self.region)?;
        let breathing = self.breathing;
        let visible = self.visible;
        *self = fresh;
        self.breathing = breathing;
        self.visible = visible;
        Ok(())
    }
}

fn dedup_ids(ids: Vec<LatticeId>) -> Vec<LatticeId> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> LatticeBundle {
        LatticeBundle::new(0, "sq", 3, 3, Region { x: 0.0, y: 0.0, width: 100.0, height: 100.0 }).unwrap()
    }

    #[test]
    fn breathing_moves_only_expand_borders() {
        let mut b = square();
        b.breathing = Some(Breathing { x_factor: 1.0, y_factor: 0.5 });
        b.apply_breathing(4.0);
        assert_eq!(b.expand.corner(0, 0), Vec2::new(-4.0, -2.0));
        assert_eq!(b.expand.corner(2, 2), Vec2::new(104.0, 102.0));
        assert_eq!(b.expand.corner(1, 1), Vec2::new(50.0, 50.0));
        assert_eq!(b.rest.corner(0, 0), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn pinned_corners_skip_quad_shift() {
        let mut b = square();
        b.pin_row(0);
        b.shift_quad(0, 0, 3.0, 4.0);
        assert_eq!(b.live.corner(0, 0), Vec2::new(0.0, 0.0));
        assert_eq!(b.live.corner(1, 1), Vec2::new(53.0, 54.0));
        assert_eq!(b.rest.corner(1, 0), Vec2::new(3.0, 54.0));
    }

    #[test]
    fn rebuild_keeps_region_and_name() {
        let mut b = square();
        b.translate_all(10.0, 0.0);
        b.rebuild(5, 2).unwrap();
        assert_eq!(b.name, "sq");
        assert_eq!((b.live.rows(), b.live.cols()), (5, 2));
        assert_eq!(b.live.corner(4, 1), Vec2::new(100.0, 100.0));
        assert!(b.rebuild(1, 2).is_err());
    }
}
