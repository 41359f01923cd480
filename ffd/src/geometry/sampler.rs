//! Parametric curve sampling into lattice parameter space.
//!
//! A curve `f(t) -> (x, y)` over `t ∈ [0, 2π)` is sampled at a fixed number of
//! evenly spaced parameters, normalized into `[0, 1]²` around 0.5 and tagged
//! with the lattice cell that owns each sample. Samples are computed once and
//! never mutated; deformation happens by moving the lattice instead.

use crate::algorithms::deform::locate_cell;
use crate::error::{FfdError, Result};
use crate::geometry::limits;
use crate::geometry::tolerance::DEFAULT_NORM_SCALE;
use crate::lattice::Lattice;
use crate::model::{SamplePoint, Vec2};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Built-in closed curve families.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Curve {
    Heart,
    Circle { radius: f32 },
    Ellipse { half_width: f32, half_height: f32 },
}

impl Curve {
    pub fn point(&self, t: f32) -> (f32, f32) {
        match *self {
            Curve::Heart => {
                let x = 16.0 * t.sin().powi(3);
                let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
                (x, y)
            }
            Curve::Circle { radius } => (radius * t.cos(), radius * t.sin()),
            Curve::Ellipse { half_width, half_height } => (half_width * t.cos(), half_height * t.sin()),
        }
    }

    fn check(&self) -> Result<()> {
        match *self {
            Curve::Heart => Ok(()),
            Curve::Circle { radius } => finite("radius", radius),
            Curve::Ellipse { half_width, half_height } => {
                finite("half_width", half_width)?;
                finite("half_height", half_height)
            }
        }
    }
}

/// How a curve is turned into parameter-space samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sampling {
    pub count: usize,
    /// Curve units mapped onto the unit square.
    pub scale: f32,
    /// Added to every curve point before normalization.
    pub offset: Vec2,
}

impl Default for Sampling {
    fn default() -> Self {
        Self { count: 200, scale: DEFAULT_NORM_SCALE, offset: Vec2::default() }
    }
}

impl Sampling {
    pub fn with_count(count: usize) -> Self {
        Self { count, ..Default::default() }
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2 { x, y };
        self
    }
}

pub fn sample_curve(curve: Curve, sampling: &Sampling, lattice: &Lattice) -> Result<Vec<SamplePoint>> {
    curve.check()?;
    sample_fn(|t| curve.point(t), sampling, lattice)
}

/// Sample an arbitrary parametric function. Output order follows `t`.
pub fn sample_fn<F>(f: F, sampling: &Sampling, lattice: &Lattice) -> Result<Vec<SamplePoint>>
where
    F: Fn(f32) -> (f32, f32),
{
    if sampling.count == 0 {
        return Err(FfdError::EmptySampling);
    }
    if !limits::sample_count_ok(sampling.count) {
        return Err(FfdError::LimitExceeded { what: "sample count", max: limits::MAX_SAMPLES, got: sampling.count });
    }
    finite("scale", sampling.scale)?;
    if sampling.scale == 0.0 {
        return Err(FfdError::InvalidConfig("sampling scale must be non-zero".into()));
    }
    finite("offset.x", sampling.offset.x)?;
    finite("offset.y", sampling.offset.y)?;

    let step = TAU / sampling.count as f32;
    let mut out = Vec::with_capacity(sampling.count);
    for k in 0..sampling.count {
        let (x, y) = f(k as f32 * step);
        let x = x + sampling.offset.x;
        let y = y + sampling.offset.y;
        // canvas y grows downward
        let u = 0.5 + x / sampling.scale;
        let v = 0.5 - y / sampling.scale;
        if !u.is_finite() || !v.is_finite() {
            return Err(FfdError::NonFinite("curve"));
        }
        let (row, col) = locate_cell(u, v, lattice);
        out.push(SamplePoint { u, v, row, col });
    }
    Ok(out)
}

/// Re-tag samples after the owning lattice changed dimensions.
pub fn relocate(samples: &mut [SamplePoint], lattice: &Lattice) {
    for s in samples.iter_mut() {
        let (row, col) = locate_cell(s.u, s.v, lattice);
        s.row = row;
        s.col = col;
    }
}

fn finite(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() { Ok(()) } else { Err(FfdError::NonFinite(name)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heart_fits_unit_square() {
        let lat = Lattice::new(4, 4, 0.0, 0.0, 100.0, 100.0).unwrap();
        let pts = sample_curve(Curve::Heart, &Sampling::default(), &lat).unwrap();
        assert_eq!(pts.len(), 200);
        for p in &pts {
            assert!(p.u >= 0.0 && p.u <= 1.0, "u={}", p.u);
            assert!(p.v >= 0.0 && p.v <= 1.0, "v={}", p.v);
            assert!(p.row <= 2 && p.col <= 2);
        }
        // t = 0 is the top cusp of the heart, centred horizontally
        assert!((pts[0].u - 0.5).abs() < 1e-6);
    }

    #[test]
    fn offset_shifts_circle() {
        let lat = Lattice::new(2, 2, 0.0, 0.0, 1.0, 1.0).unwrap();
        let s = Sampling::with_count(8).offset(-5.0, 0.0);
        let pts = sample_curve(Curve::Circle { radius: 2.0 }, &s, &lat).unwrap();
        let cu: f32 = pts.iter().map(|p| p.u).sum::<f32>() / pts.len() as f32;
        assert!((cu - (0.5 - 5.0 / 34.0)).abs() < 1e-5);
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        let lat = Lattice::new(2, 2, 0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(
            sample_curve(Curve::Heart, &Sampling::with_count(0), &lat),
            Err(FfdError::EmptySampling)
        );
        assert_eq!(
            sample_curve(Curve::Circle { radius: f32::NAN }, &Sampling::default(), &lat),
            Err(FfdError::NonFinite("radius"))
        );
    }
}
