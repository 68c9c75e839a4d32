pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod memory;
pub mod simulation;
pub mod statistics;

pub use algorithms::{Algorithm, PathfindingAlgorithm};
pub use error::{Error, Result};
pub use grid::{Direction, Grid, Position};
pub use maze::{EndpointPolicy, MazeGenerator, PathMode};
