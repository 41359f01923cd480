use crate::algorithms::picking::Hit;
use crate::algorithms::propagate::{move_control_point_impl, move_user_point_impl, DragSource};
use crate::animation::AnimationController;
use crate::bundle::LatticeBundle;
use crate::model::{LatticeId, PointKind};
use serde::{Deserialize, Serialize};

/// The point currently held by the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDrag {
    pub kind: PointKind,
    pub lattice: LatticeId,
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    active: Option<ActiveDrag>,
}

impl InteractionController {
    pub fn new() -> Self { Self::default() }

    pub fn active(&self) -> Option<ActiveDrag> { self.active }

    /// Grab the hit point. Refused while the animation is playing.
    pub fn on_drag_start(&mut self, hit: &Hit, animation: &AnimationController) -> bool {
        if animation.is_playing() {
            log::warn!("drag refused while animation is playing");
            return false;
        }
        let drag = ActiveDrag { kind: hit.kind, lattice: hit.lattice, row: hit.row, col: hit.col };
        log::trace!("drag start {:?}", drag);
        self.active = Some(drag);
        true
    }

    /// Move the held point to `(x, y)`. Returns whether anything moved.
    /// A drag still held once playback runs is dropped.
    pub fn on_drag_move(
        &mut self,
        bundles: &mut [LatticeBundle],
        animation: &AnimationController,
        x: f32,
        y: f32,
    ) -> bool {
        let Some(d) = self.active else { return false };
        if animation.is_playing() {
            log::warn!("drag {:?} dropped while animation is playing", d);
            self.active = None;
            return false;
        }
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        match d.kind {
            PointKind::Control => move_control_point_impl(bundles, d.lattice, d.row, d.col, x, y).is_some(),
            PointKind::User => {
                move_user_point_impl(bundles, d.lattice, d.row, d.col, x, y, DragSource::Pointer).is_some()
            }
        }
    }

    pub fn on_drag_end(&mut self) {
        if let Some(d) = self.active.take() {
            log::trace!("drag end {:?}", d);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.on_drag_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Region;

    #[test]
    fn held_drag_is_dropped_once_playback_runs() {
        let r = Region { x: 0.0, y: 0.0, width: 100.0, height: 100.0 };
        let mut bundles = vec![LatticeBundle::new(0, "grid", 2, 2, r).unwrap()];
        let mut anim = AnimationController::default();
        let mut ic = InteractionController::new();
        let hit = Hit { kind: PointKind::User, lattice: 0, row: 0, col: 0, dist: 0.0 };
        assert!(ic.on_drag_start(&hit, &anim));

        anim.play();
        assert!(!ic.on_drag_move(&mut bundles, &anim, 80.0, 80.0));
        assert!(ic.active().is_none());
        assert_eq!(bundles[0].user_live.at(0, 0).pos(), crate::model::Vec2::new(50.0, 50.0));
    }
}
