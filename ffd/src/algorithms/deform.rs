use crate::lattice::Lattice;
use crate::model::{SamplePoint, Vec2};

/// Upper-left cell `(row, col)` owning parametric point `(u, v)`.
///
/// Clamped to `[0, rows-2] × [0, cols-2]` so `u = 1` or `v = 1` stays inside.
#[inline]
pub fn locate_cell(u: f32, v: f32, lattice: &Lattice) -> (usize, usize) {
    let rows = lattice.rows();
    let cols = lattice.cols();
    let i = (v * (rows - 1) as f32).floor().max(0.0) as usize;
    let j = (u * (cols - 1) as f32).floor().max(0.0) as usize;
    (i.min(rows - 2), j.min(cols - 2))
}

/// Bilinear blend of the four corners of `cell` at `(u, v)`.
///
/// `cell` must come from [`locate_cell`] on a lattice with the same dimensions.
#[inline]
pub fn evaluate(u: f32, v: f32, cell: (usize, usize), lattice: &Lattice) -> Vec2 {
    let (i, j) = cell;
    let p00 = lattice.at(i, j);
    let p01 = lattice.at(i, j + 1);
    let p10 = lattice.at(i + 1, j);
    let p11 = lattice.at(i + 1, j + 1);

    let uf = u * (lattice.cols() - 1) as f32 - j as f32;
    let vf = v * (lattice.rows() - 1) as f32 - i as f32;

    let w00 = (1.0 - uf) * (1.0 - vf);
    let w01 = uf * (1.0 - vf);
    let w10 = (1.0 - uf) * vf;
    let w11 = uf * vf;
    Vec2 {
        x: w00 * p00.x + w01 * p01.x + w10 * p10.x + w11 * p11.x,
        y: w00 * p00.y + w01 * p01.y + w10 * p10.y + w11 * p11.y,
    }
}

#[inline]
pub fn evaluate_sample(s: &SamplePoint, lattice: &Lattice) -> Vec2 {
    evaluate(s.u, s.v, (s.row, s.col), lattice)
}

/// Map a whole sample sequence into canvas space; order is preserved.
pub fn deform(samples: &[SamplePoint], lattice: &Lattice) -> Vec<Vec2> {
    samples.iter().map(|s| evaluate_sample(s, lattice)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_square() {
        let l = Lattice::new(2, 2, 0.0, 0.0, 100.0, 100.0).unwrap();
        assert_eq!(evaluate(0.5, 0.5, (0, 0), &l), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn unit_edge_resolves_to_last_cell() {
        let l = Lattice::new(4, 3, 0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(locate_cell(1.0, 1.0, &l), (2, 1));
        assert_eq!(locate_cell(0.0, 0.0, &l), (0, 0));
        assert_eq!(locate_cell(-0.2, 0.4, &l), (1, 0));
    }
}
