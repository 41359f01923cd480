use crate::animation::{AnimationState, Direction};
use crate::model::{LatticeId, ShapeId, ShapeStyle, Vec2};
use crate::Engine;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs for one frame. Read-only view of the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Frame {
    pub state: AnimationState,
    pub direction: Direction,
    pub progress: f32,
    pub lattices: Vec<LatticeFrame>,
    pub shapes: Vec<ShapeFrame>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeFrame {
    pub id: LatticeId,
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    /// Grid lines and markers should be drawn.
    pub visible: bool,
    /// Row-major `[x, y, ...]` control positions.
    pub points: Vec<f32>,
    pub pinned: Vec<bool>,
    /// Row-major `[x, y, ...]` user point positions.
    pub user_points: Vec<f32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShapeFrame {
    pub id: ShapeId,
    pub name: String,
    pub lattice: LatticeId,
    pub style: ShapeStyle,
    pub outline: Vec<Vec2>,
}

pub(crate) fn frame_impl(e: &Engine) -> Frame {
    let grid_visible = e.config().grid_visible;
    let lattices = e
        .bundles()
        .iter()
        .map(|b| LatticeFrame {
            id: b.id,
            name: b.name.clone(),
            rows: b.live.rows(),
            cols: b.live.cols(),
            visible: grid_visible && b.visible,
            points: b.live.positions(),
            pinned: b.live.points().iter().map(|p| p.pinned).collect(),
            user_points: b.user_live.points().iter().flat_map(|p| [p.x, p.y]).collect(),
        })
        .collect();
    let shapes = e
        .shapes()
        .iter()
        .map(|s| ShapeFrame {
            id: s.id,
            name: s.name.clone(),
            lattice: s.lattice,
            style: s.style,
            outline: e.outline(s.id).unwrap_or_default(),
        })
        .collect();
    Frame {
        state: e.animation().state(),
        direction: e.animation().direction(),
        progress: e.progress(),
        lattices,
        shapes,
    }
}
