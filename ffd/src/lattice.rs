use crate::error::{FfdError, Result};
use crate::geometry::limits;
use crate::geometry::math::{half_turn, midpoint};
use crate::model::{ControlPoint, UserPoint, Vec2};
use serde::{Deserialize, Serialize};

/// Rectangle a lattice was laid out over; kept so the grid can be rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Row-major grid of control points. Always at least 2×2.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    points: Vec<ControlPoint>,
}

impl Lattice {
    /// Evenly space `rows × cols` control points across a rectangle.
    pub fn new(rows: usize, cols: usize, origin_x: f32, origin_y: f32, width: f32, height: f32) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(FfdError::DegenerateLattice { rows, cols });
        }
        check_dims(rows, cols)?;
        for (name, v) in [("origin_x", origin_x), ("origin_y", origin_y), ("width", width), ("height", height)] {
            if !v.is_finite() {
                return Err(FfdError::NonFinite(name));
            }
        }
        let mut points = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let x = origin_x + (j as f32 / (cols - 1) as f32) * width;
                let y = origin_y + (i as f32 / (rows - 1) as f32) * height;
                points.push(ControlPoint::at(x, y));
            }
        }
        Ok(Self { rows, cols, points })
    }

    pub fn over(rows: usize, cols: usize, region: Region) -> Result<Self> {
        Self::new(rows, cols, region.x, region.y, region.width, region.height)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize { row * self.cols + col }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool { row < self.rows && col < self.cols }

    /// Panics when out of bounds; use [`Lattice::get`] for checked access.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> &ControlPoint { &self.points[self.idx(row, col)] }

    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut ControlPoint {
        let i = self.idx(row, col);
        &mut self.points[i]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&ControlPoint> {
        if self.in_bounds(row, col) { Some(self.at(row, col)) } else { None }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut ControlPoint> {
        if self.in_bounds(row, col) { Some(self.at_mut(row, col)) } else { None }
    }

    pub fn corner(&self, row: usize, col: usize) -> Vec2 { self.at(row, col).pos() }

    /// Points with their `(row, col)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &ControlPoint)> + '_ {
        let cols = self.cols;
        self.points.iter().enumerate().map(move |(k, p)| (k / cols, k % cols, p))
    }

    pub fn points(&self) -> &[ControlPoint] { &self.points }
    pub fn points_mut(&mut self) -> &mut [ControlPoint] { &mut self.points }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        for p in &mut self.points { p.translate(dx, dy); }
    }

    /// Flat `[x0, y0, x1, y1, ...]` positions, row-major.
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.points.len() * 2);
        for p in &self.points { out.push(p.x); out.push(p.y); }
        out
    }

    /// Midpoint of the (0,0) and (rows-1, cols-1) corners.
    pub fn center(&self) -> Vec2 {
        midpoint(self.corner(0, 0), self.corner(self.rows - 1, self.cols - 1))
    }

    pub fn rotate_half_turn(&mut self, center: Vec2) {
        for p in &mut self.points {
            let q = half_turn(p.pos(), center);
            p.x = q.x;
            p.y = q.y;
        }
    }

    /// Copy positions from `other` while keeping this lattice's flags.
    pub(crate) fn copy_positions_from(&mut self, other: &Lattice) {
        for (p, q) in self.points.iter_mut().zip(other.points.iter()) {
            p.x = q.x;
            p.y = q.y;
        }
    }
}

/// One drag handle per interior quad, `(rows-1) × (cols-1)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserLayer {
    rows: usize,
    cols: usize,
    points: Vec<UserPoint>,
}

impl UserLayer {
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let rows = lattice.rows() - 1;
        let cols = lattice.cols() - 1;
        let mut points = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let m = midpoint(lattice.corner(i, j), lattice.corner(i + 1, j + 1));
                points.push(UserPoint { x: m.x, y: m.y, carries: Vec::new() });
            }
        }
        Self { rows, cols, points }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool { row < self.rows && col < self.cols }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> &UserPoint { &self.points[row * self.cols + col] }

    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut UserPoint {
        let c = self.cols;
        &mut self.points[row * c + col]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&UserPoint> {
        if self.in_bounds(row, col) { Some(self.at(row, col)) } else { None }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &UserPoint)> + '_ {
        let cols = self.cols;
        self.points.iter().enumerate().map(move |(k, p)| (k / cols, k % cols, p))
    }

    pub fn points(&self) -> &[UserPoint] { &self.points }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        for p in &mut self.points { p.translate(dx, dy); }
    }

    pub fn rotate_half_turn(&mut self, center: Vec2) {
        for p in &mut self.points {
            let q = half_turn(p.pos(), center);
            p.x = q.x;
            p.y = q.y;
        }
    }

    pub(crate) fn copy_positions_from(&mut self, other: &UserLayer) {
        for (p, q) in self.points.iter_mut().zip(other.points.iter()) {
            p.x = q.x;
            p.y = q.y;
        }
    }
}

pub(crate) fn check_dims(rows: usize, cols: usize) -> Result<()> {
    for (what, n) in [("rows", rows), ("cols", cols)] {
        if !limits::grid_dim_ok(n) {
            return Err(FfdError::LimitExceeded { what, max: limits::MAX_GRID_DIM, got: n });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_spacing() {
        let l = Lattice::new(3, 5, 10.0, 20.0, 100.0, 50.0).unwrap();
        assert_eq!(l.corner(0, 0), Vec2::new(10.0, 20.0));
        assert_eq!(l.corner(2, 4), Vec2::new(110.0, 70.0));
        assert_eq!(l.corner(1, 2), Vec2::new(60.0, 45.0));
        assert_eq!(l.points().len(), 15);
    }

    #[test]
    fn degenerate_dimensions_rejected() {
        assert_eq!(
            Lattice::new(1, 4, 0.0, 0.0, 1.0, 1.0),
            Err(FfdError::DegenerateLattice { rows: 1, cols: 4 })
        );
        assert!(Lattice::new(4, 0, 0.0, 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn user_layer_uses_diagonal_midpoints() {
        let l = Lattice::new(3, 3, 0.0, 0.0, 100.0, 100.0).unwrap();
        let u = UserLayer::from_lattice(&l);
        assert_eq!((u.rows(), u.cols()), (2, 2));
        assert_eq!(u.at(0, 0).pos(), Vec2::new(25.0, 25.0));
        assert_eq!(u.at(1, 1).pos(), Vec2::new(75.0, 75.0));
    }
}
