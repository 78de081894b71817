// src/error.rs

use thiserror::Error;

/// Failures raised while building a model object or reading one back from
/// its exchange representation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{species} species but {coords} coordinates")]
    LengthMismatch { species: usize, coords: usize },
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("lattice matrix is singular")]
    SingularLattice,
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    #[error("charge of {charge} and spin multiplicity of {spin_multiplicity} are not possible")]
    SpinCharge { charge: i32, spin_multiplicity: u32 },
    #[error("invalid field '{0}'")]
    InvalidField(&'static str),
    #[error("expected @class '{expected}', found '{found}'")]
    WrongClass { expected: &'static str, found: String },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
