//! Keyframe timeline between the rest and expand snapshots.
//!
//! The controller owns no clock. Each call to [`AnimationController::tick`]
//! derives progress from the supplied timestamp and the recorded start, so a
//! given timestamp sequence always replays to the same state.

use crate::geometry::easing::ease_in_out_cubic;
use crate::geometry::tolerance::clamp01;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// rest → expand
    #[serde(rename = "forward")]
    Forward,
    /// expand → rest
    #[serde(rename = "backward")]
    Backward,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "forward")]
    PlayingForward,
    #[serde(rename = "backward")]
    PlayingBackward,
    #[serde(rename = "paused")]
    Paused,
}

/// Blend to apply for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Direction of the pass this tick belongs to.
    pub direction: Direction,
    pub progress: f32,
    pub eased: f32,
    /// The pass finished on this tick and the next one runs the other way.
    pub flipped: bool,
}

#[derive(Clone, Debug)]
pub struct AnimationController {
    state: AnimationState,
    direction: Direction,
    // None until the first tick of a pass anchors it
    start: Option<f64>,
    // signed offset into the pass recorded by pause
    paused_offset: Option<f64>,
    speed: f32,
    duration_ms: f64,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(1.0, 1000.0)
    }
}

impl AnimationController {
    pub fn new(speed: f32, duration_ms: f64) -> Self {
        Self {
            state: AnimationState::Idle,
            direction: Direction::Forward,
            start: None,
            paused_offset: None,
            speed,
            duration_ms,
        }
    }

    pub fn state(&self) -> AnimationState { self.state }
    pub fn direction(&self) -> Direction { self.direction }
    pub fn speed(&self) -> f32 { self.speed }
    pub fn duration_ms(&self) -> f64 { self.duration_ms }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, AnimationState::PlayingForward | AnimationState::PlayingBackward)
    }

    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            log::warn!("ignoring animation speed {speed}");
        }
    }

    pub fn set_duration(&mut self, duration_ms: f64) {
        if duration_ms.is_finite() && duration_ms > 0.0 {
            self.duration_ms = duration_ms;
        } else {
            log::warn!("ignoring animation duration {duration_ms}");
        }
    }

    fn playing_state(&self) -> AnimationState {
        match self.direction {
            Direction::Forward => AnimationState::PlayingForward,
            Direction::Backward => AnimationState::PlayingBackward,
        }
    }

    /// Start a pass in the current direction from Idle. Anchors on the next tick.
    pub fn play(&mut self) {
        if self.state == AnimationState::Idle {
            self.start = None;
            self.state = self.playing_state();
        }
    }

    pub fn pause(&mut self, now: f64) {
        if !now.is_finite() {
            log::warn!("ignoring pause at {now}");
            return;
        }
        if self.is_playing() {
            self.paused_offset = self.start.map(|s| now - s);
            self.state = AnimationState::Paused;
        }
    }

    pub fn resume(&mut self, now: f64) {
        if !now.is_finite() {
            log::warn!("ignoring resume at {now}");
            return;
        }
        if self.state == AnimationState::Paused {
            self.start = self.paused_offset.take().map(|off| now - off);
            self.state = self.playing_state();
        }
    }

    /// Idle → playing, playing → paused, paused → playing.
    pub fn toggle(&mut self, now: f64) {
        match self.state {
            AnimationState::Idle => self.play(),
            AnimationState::Paused => self.resume(now),
            _ => self.pause(now),
        }
    }

    /// Stop updating live state where it is. The direction is kept; the pass restarts on play.
    pub fn stop(&mut self) {
        self.state = AnimationState::Idle;
        self.start = None;
        self.paused_offset = None;
    }

    /// Progress of the current pass at `now`, or `None` when not anchored.
    pub fn progress_at(&self, now: f64) -> Option<f32> {
        let start = self.start?;
        let u = (now - start) / self.duration_ms * self.speed as f64;
        Some(clamp01(u as f32))
    }

    /// Non-finite timestamps are dropped without anchoring the pass.
    pub fn tick(&mut self, now: f64) -> Option<Step> {
        if !self.is_playing() || !now.is_finite() {
            return None;
        }
        let start = *self.start.get_or_insert(now);
        let u = clamp01(((now - start) / self.duration_ms * self.speed as f64) as f32);
        let direction = self.direction;
        let mut step = Step { direction, progress: u, eased: ease_in_out_cubic(u), flipped: false };
        if u >= 1.0 {
            self.direction = direction.flipped();
            self.start = None;
            self.state = self.playing_state();
            step.flipped = true;
            log::debug!("animation pass {:?} complete at {now}", direction);
        }
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_anchors_at_zero_progress() {
        let mut a = AnimationController::new(1.0, 1000.0);
        assert_eq!(a.tick(5.0), None);
        a.play();
        let s = a.tick(5000.0).unwrap();
        assert_eq!(s.progress, 0.0);
        assert_eq!(s.direction, Direction::Forward);
        let s = a.tick(5500.0).unwrap();
        assert!((s.progress - 0.5).abs() < 1e-6);
    }

    #[test]
    fn completes_and_flips() {
        let mut a = AnimationController::new(2.0, 1000.0);
        a.play();
        a.tick(0.0);
        let s = a.tick(600.0).unwrap();
        assert_eq!(s.progress, 1.0);
        assert!(s.flipped);
        assert_eq!(a.state(), AnimationState::PlayingBackward);
        let s = a.tick(700.0).unwrap();
        assert_eq!((s.direction, s.progress), (Direction::Backward, 0.0));
    }

    #[test]
    fn pause_resume_continues_without_jump() {
        let mut a = AnimationController::new(1.0, 1000.0);
        a.play();
        a.tick(100.0);
        a.tick(400.0);
        a.toggle(400.0);
        assert_eq!(a.state(), AnimationState::Paused);
        assert_eq!(a.tick(900.0), None);
        a.toggle(2000.0);
        let s = a.tick(2000.0).unwrap();
        assert!((s.progress - 0.3).abs() < 1e-6);
    }

    #[test]
    fn stop_keeps_direction() {
        let mut a = AnimationController::new(1.0, 10.0);
        a.play();
        a.tick(0.0);
        a.tick(20.0);
        a.stop();
        assert_eq!(a.state(), AnimationState::Idle);
        a.play();
        assert_eq!(a.state(), AnimationState::PlayingBackward);
    }

    #[test]
    fn non_finite_timestamps_do_not_stall_the_pass() {
        let mut a = AnimationController::new(1.0, 1000.0);
        a.play();
        assert_eq!(a.tick(f64::NAN), None);
        assert_eq!(a.tick(f64::INFINITY), None);
        a.tick(0.0);
        let s = a.tick(1000.0).unwrap();
        assert!(s.flipped);

        a.pause(f64::NAN);
        assert!(a.is_playing());
        a.pause(1100.0);
        a.resume(f64::NAN);
        assert_eq!(a.state(), AnimationState::Paused);
    }
}
