pub mod model;
pub mod error;
pub mod config;
pub mod lattice;
pub mod bundle;
pub mod animation;
pub mod interaction;
pub mod figure;
pub mod geometry {
    pub mod easing;
    pub mod limits;
    pub mod math;
    pub mod sampler;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod carries;
    pub mod deform;
    pub mod picking;
    pub mod propagate;
}
mod frame;

pub use algorithms::picking::Hit;
pub use animation::{AnimationController, AnimationState, Direction, Step};
pub use bundle::{Breathing, LatticeBundle};
pub use config::EngineConfig;
pub use error::{FfdError, Result};
pub use frame::{Frame, LatticeFrame, ShapeFrame};
pub use interaction::{ActiveDrag, InteractionController};
pub use lattice::{Lattice, Region, UserLayer};
pub use model::{Color, ControlPoint, LatticeId, PointKind, SamplePoint, Shape, ShapeId, ShapeStyle, UserPoint, Vec2};

use algorithms::propagate::{move_control_point_impl, move_user_point_impl, DragSource};
use geometry::math::lerp;
use geometry::sampler::{sample_curve, Curve, Sampling};

/// Setup-time assembly of lattices, shapes and carries links.
///
/// Configuration errors surface from [`SceneBuilder::build`]; an [`Engine`] is
/// never produced from a degenerate lattice or a cyclic carries graph.
pub struct SceneBuilder {
    config: EngineConfig,
    bundles: Vec<LatticeBundle>,
    shapes: Vec<Shape>,
}

impl SceneBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, bundles: Vec::new(), shapes: Vec::new() }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn add_lattice(&mut self, name: &str, rows: usize, cols: usize, region: Region) -> Result<LatticeId> {
        let id = self.bundles.len() as LatticeId;
        let b = LatticeBundle::new(id, name, rows, cols, region)?;
        log::debug!("lattice {id} '{name}' {rows}x{cols}");
        self.bundles.push(b);
        Ok(id)
    }

    pub fn bundle(&self, id: LatticeId) -> Option<&LatticeBundle> { self.bundles.get(id as usize) }

    pub fn bundle_mut(&mut self, id: LatticeId) -> Option<&mut LatticeBundle> { self.bundles.get_mut(id as usize) }

    /// Sample `curve` against lattice `lattice`. Uses the configured sample count when `sampling.count` is 0.
    pub fn add_shape(&mut self, name: &str, lattice: LatticeId, curve: Curve, sampling: Sampling, style: ShapeStyle) -> Result<ShapeId> {
        let b = self.bundles.get(lattice as usize).ok_or(FfdError::UnknownLattice(lattice))?;
        let sampling = if sampling.count == 0 { Sampling { count: self.config.sample_count, ..sampling } } else { sampling };
        let samples = sample_curve(curve, &sampling, &b.live)?;
        let id = self.shapes.len() as ShapeId;
        self.shapes.push(Shape { id, name: name.to_string(), lattice, samples, style });
        Ok(id)
    }

    pub fn build(mut self) -> Result<Engine> {
        self.config.validate()?;
        algorithms::carries::validate_carries(&self.bundles)?;
        let shift = self.config.expansion_shift;
        for b in &mut self.bundles {
            b.apply_breathing(shift);
        }
        log::debug!("scene built: {} lattices, {} shapes", self.bundles.len(), self.shapes.len());
        Ok(Engine {
            animation: AnimationController::new(self.config.speed, self.config.duration_ms),
            interaction: InteractionController::new(),
            applied_shift: shift,
            last_progress: 0.0,
            config: self.config,
            bundles: self.bundles,
            shapes: self.shapes,
        })
    }
}

/// Owns every lattice bundle by handle plus the animation and drag state.
pub struct Engine {
    config: EngineConfig,
    bundles: Vec<LatticeBundle>,
    shapes: Vec<Shape>,
    animation: AnimationController,
    interaction: InteractionController,
    applied_shift: f32,
    last_progress: f32,
}

impl Engine {
    /// The articulated figure with default settings.
    pub fn new() -> Result<Engine> {
        figure::figure_scene(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn bundles(&self) -> &[LatticeBundle] { &self.bundles }
    pub fn bundle(&self, id: LatticeId) -> Option<&LatticeBundle> { self.bundles.get(id as usize) }
    pub fn lattice_count(&self) -> u32 { self.bundles.len() as u32 }
    pub fn shapes(&self) -> &[Shape] { &self.shapes }
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> { self.shapes.get(id as usize) }
    pub fn animation(&self) -> &AnimationController { &self.animation }
    pub fn interaction(&self) -> &InteractionController { &self.interaction }
    /// Progress of the most recently applied tick.
    pub fn progress(&self) -> f32 { self.last_progress }

    // Animation

    /// Starting or resuming playback drops any drag in progress.
    pub fn play(&mut self) {
        self.animation.play();
        self.end_drag_if_playing();
    }
    pub fn pause(&mut self, now: f64) { self.animation.pause(now); }
    pub fn resume(&mut self, now: f64) {
        self.animation.resume(now);
        self.end_drag_if_playing();
    }
    pub fn stop(&mut self) { self.animation.stop(); }

    /// Play/pause switch. Starting playback drops any drag in progress.
    pub fn toggle_animation(&mut self, now: f64) {
        self.animation.toggle(now);
        self.end_drag_if_playing();
    }

    fn end_drag_if_playing(&mut self) {
        if self.animation.is_playing() {
            self.interaction.on_drag_end();
        }
    }

    /// Advance the timeline to `now`. Returns whether live state changed.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.animation.tick(now) {
            Some(step) => {
                self.apply_step(&step);
                self.last_progress = step.progress;
                true
            }
            None => false,
        }
    }

    fn apply_step(&mut self, step: &Step) {
        let t = step.eased;
        for k in 0..self.bundles.len() {
            let b = &mut self.bundles[k];
            let (from, to) = match step.direction {
                Direction::Forward => (&b.rest, &b.expand),
                Direction::Backward => (&b.expand, &b.rest),
            };
            let blended: Vec<(f32, f32)> = from
                .points()
                .iter()
                .zip(to.points())
                .map(|(a, c)| (lerp(a.x, c.x, t), lerp(a.y, c.y, t)))
                .collect();
            for (p, (x, y)) in b.live.points_mut().iter_mut().zip(blended) {
                p.x = x;
                p.y = y;
            }

            let (ufrom, uto) = match step.direction {
                Direction::Forward => (&b.user_rest, &b.user_expand),
                Direction::Backward => (&b.user_expand, &b.user_rest),
            };
            let targets: Vec<(usize, usize, f32, f32)> = ufrom
                .iter()
                .zip(uto.iter())
                .map(|((i, j, a), (_, _, c))| (i, j, lerp(a.x, c.x, t), lerp(a.y, c.y, t)))
                .collect();
            let id = k as LatticeId;
            for (i, j, x, y) in targets {
                move_user_point_impl(&mut self.bundles, id, i, j, x, y, DragSource::Keyframe);
            }
        }
    }

    // Interaction

    pub fn hit_test(&self, x: f32, y: f32) -> Option<Hit> {
        self.hit_test_radius(x, y, self.config.hit_radius)
    }

    pub fn hit_test_radius(&self, x: f32, y: f32, radius: f32) -> Option<Hit> {
        algorithms::picking::hit_test_impl(&self.bundles, x, y, radius)
    }

    /// Hit-test and grab. Returns the grabbed point, or `None` on a miss or while playing.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<Hit> {
        let hit = self.hit_test(x, y)?;
        if self.interaction.on_drag_start(&hit, &self.animation) { Some(hit) } else { None }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.interaction.on_drag_move(&mut self.bundles, &self.animation, x, y)
    }

    pub fn pointer_up(&mut self) { self.interaction.on_drag_end(); }

    pub fn pointer_leave(&mut self) { self.interaction.on_pointer_leave(); }

    /// Programmatic user-point edit with pointer semantics. Refused while playing.
    pub fn move_user_point(&mut self, id: LatticeId, row: usize, col: usize, x: f32, y: f32) -> Option<Vec2> {
        if self.animation.is_playing() || !x.is_finite() || !y.is_finite() {
            return None;
        }
        move_user_point_impl(&mut self.bundles, id, row, col, x, y, DragSource::Pointer)
    }

    /// Programmatic control-point edit. Refused while playing or when pinned.
    pub fn move_control_point(&mut self, id: LatticeId, row: usize, col: usize, x: f32, y: f32) -> Option<Vec2> {
        if self.animation.is_playing() || !x.is_finite() || !y.is_finite() {
            return None;
        }
        move_control_point_impl(&mut self.bundles, id, row, col, x, y)
    }

    // Configuration surface

    pub fn set_speed(&mut self, speed: f32) {
        self.animation.set_speed(speed);
        self.config.speed = self.animation.speed();
    }

    /// Re-apply breathing offsets by the difference to the previous shift.
    pub fn set_expansion_shift(&mut self, shift: f32) {
        if !shift.is_finite() {
            log::warn!("ignoring expansion shift {shift}");
            return;
        }
        let delta = shift - self.applied_shift;
        for b in &mut self.bundles {
            b.apply_breathing(delta);
        }
        self.applied_shift = shift;
        self.config.expansion_shift = shift;
    }

    pub fn set_grid_visible(&mut self, visible: bool) { self.config.grid_visible = visible; }

    pub fn set_lattice_visible(&mut self, id: LatticeId, visible: bool) -> bool {
        match self.bundles.get_mut(id as usize) {
            Some(b) => {
                b.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn set_hit_radius(&mut self, radius: f32) {
        if radius.is_finite() && radius > 0.0 {
            self.config.hit_radius = radius;
        } else {
            log::warn!("ignoring hit radius {radius}");
        }
    }

    /// Reset lattice `id` to an evenly spaced `rows × cols` grid and re-locate bound samples.
    pub fn rebuild_lattice(&mut self, id: LatticeId, rows: usize, cols: usize) -> Result<()> {
        let b = self.bundles.get_mut(id as usize).ok_or(FfdError::UnknownLattice(id))?;
        b.rebuild(rows, cols)?;
        b.apply_breathing(self.applied_shift);
        self.interaction.on_drag_end();
        let lattice = &self.bundles[id as usize].live;
        for s in self.shapes.iter_mut().filter(|s| s.lattice == id) {
            geometry::sampler::relocate(&mut s.samples, lattice);
        }
        log::debug!("lattice {id} rebuilt as {rows}x{cols}");
        // rebuilding drops carries, which cannot introduce a cycle
        Ok(())
    }

    // Rendering

    /// Deformed outline of shape `id` in canvas space.
    pub fn outline(&self, id: ShapeId) -> Option<Vec<Vec2>> {
        let s = self.shapes.get(id as usize)?;
        let b = self.bundles.get(s.lattice as usize)?;
        Some(algorithms::deform::deform(&s.samples, &b.live))
    }

    pub fn frame(&self) -> Frame { frame::frame_impl(self) }

    pub fn frame_json(&self) -> serde_json::Value {
        serde_json::to_value(self.frame()).unwrap_or(serde_json::Value::Null)
    }
}
