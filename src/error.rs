use thiserror::Error;

use crate::grid::Position;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("maze of {rows}x{cols} is too small to carve (minimum is 3x3)")]
    InvalidSize { rows: usize, cols: usize },

    #[error("extra-opening density must be in (0, 1], got {0}")]
    InvalidDensity(f64),

    #[error("malformed grid: {0}")]
    MalformedGrid(MalformedReason),

    #[error("{algorithm} found no path to the end cell")]
    NoPathFound { algorithm: String },

    #[error("grid parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    OutOfBounds(Position),
    WallEndpoint(Position),
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::OutOfBounds(p) => write!(f, "{} lies outside the grid", p),
            MalformedReason::WallEndpoint(p) => write!(f, "endpoint {} is a wall", p),
        }
    }
}
