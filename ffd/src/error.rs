use crate::model::LatticeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FfdError {
    #[error("lattice needs at least 2 rows and 2 columns, got {rows}x{cols}")]
    DegenerateLattice { rows: usize, cols: usize },
    #[error("shape sampling needs at least one sample")]
    EmptySampling,
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("unknown lattice id {0}")]
    UnknownLattice(LatticeId),
    #[error("lattice {0} cannot carry itself")]
    SelfCarry(LatticeId),
    #[error("carries relation has a cycle through lattices {0:?}")]
    CarriesCycle(Vec<LatticeId>),
    #[error("{what} is {got}, above the limit of {max}")]
    LimitExceeded { what: &'static str, max: usize, got: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FfdError>;
