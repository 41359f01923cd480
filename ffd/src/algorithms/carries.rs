use crate::bundle::LatticeBundle;
use crate::error::{FfdError, Result};
use crate::model::LatticeId;

/// Check the carries relation: known targets, no self-links, no cycles.
pub fn validate_carries(bundles: &[LatticeBundle]) -> Result<()> {
    let n = bundles.len();
    let mut edges: Vec<Vec<LatticeId>> = Vec::with_capacity(n);
    for b in bundles {
        let out = b.carried();
        for &t in &out {
            if t == b.id {
                return Err(FfdError::SelfCarry(t));
            }
            if t as usize >= n {
                return Err(FfdError::UnknownLattice(t));
            }
        }
        edges.push(out);
    }

    // 0 = unvisited, 1 = on stack, 2 = done
    let mut state = vec![0u8; n];
    let mut path: Vec<LatticeId> = Vec::new();
    for start in 0..n {
        if state[start] == 0 {
            visit(start, &edges, &mut state, &mut path)?;
        }
    }
    Ok(())
}

fn visit(v: usize, edges: &[Vec<LatticeId>], state: &mut [u8], path: &mut Vec<LatticeId>) -> Result<()> {
    state[v] = 1;
    path.push(v as LatticeId);
    for &w in &edges[v] {
        let w = w as usize;
        match state[w] {
            0 => visit(w, edges, state, path)?,
            1 => {
                let at = path.iter().position(|&p| p as usize == w).unwrap_or(0);
                let mut cycle = path[at..].to_vec();
                cycle.push(w as LatticeId);
                return Err(FfdError::CarriesCycle(cycle));
            }
            _ => {}
        }
    }
    path.pop();
    state[v] = 2;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Region;

    fn bundles(n: u32) -> Vec<LatticeBundle> {
        let r = Region { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
        (0..n).map(|i| LatticeBundle::new(i, format!("l{i}"), 2, 2, r).unwrap()).collect()
    }

    #[test]
    fn diamond_is_acyclic() {
        let mut b = bundles(4);
        b[0].set_user_carries(0, 0, vec![1, 2]);
        b[1].set_user_carries(0, 0, vec![3]);
        b[2].set_control_carries(1, 1, vec![3]);
        assert_eq!(validate_carries(&b), Ok(()));
    }

    #[test]
    fn cycle_is_reported_with_path() {
        let mut b = bundles(3);
        b[0].set_user_carries(0, 0, vec![1]);
        b[1].set_user_carries(0, 0, vec![2]);
        b[2].set_control_carries(0, 0, vec![0]);
        assert_eq!(validate_carries(&b), Err(FfdError::CarriesCycle(vec![0, 1, 2, 0])));
    }

    #[test]
    fn self_and_unknown_targets() {
        let mut b = bundles(2);
        b[1].set_user_carries(0, 0, vec![1]);
        assert_eq!(validate_carries(&b), Err(FfdError::SelfCarry(1)));
        b[1].set_user_carries(0, 0, vec![7]);
        assert_eq!(validate_carries(&b), Err(FfdError::UnknownLattice(7)));
    }
}
