use std::time::Instant;

use log::{debug, warn};
use pathfinding::prelude::bfs;
use rayon::prelude::*;

use crate::algorithms::Algorithm;
use crate::error::Result;
use crate::grid::Grid;
use crate::maze::{MazeGenerator, PathMode};
use crate::memory;
use crate::statistics::RunMetrics;

/// One test iteration: a single maze layout handed to every algorithm.
pub struct Simulation {
    layout: Grid,
    path_mode: PathMode,
    optimal_path_length: usize,
}

impl Simulation {
    pub fn generate(
        generator: &mut MazeGenerator,
        rows: usize,
        cols: usize,
        path_mode: PathMode,
    ) -> Result<Self> {
        let layout = generator.generate(rows, cols, path_mode)?;
        Ok(Self::from_grid(layout, path_mode))
    }

    pub fn from_grid(layout: Grid, path_mode: PathMode) -> Self {
        let optimal_path_length = reference_path_length(&layout);
        Simulation {
            layout,
            path_mode,
            optimal_path_length,
        }
    }

    pub fn layout(&self) -> &Grid {
        &self.layout
    }

    /// Cells on a shortest path, or 0 when the end is unreachable.
    pub fn optimal_path_length(&self) -> usize {
        self.optimal_path_length
    }

    /// Run every algorithm on its own copy of the layout, in parallel, and
    /// wait for all of them.
    ///
    /// Results come back in the order of `algorithms`. A grid that fails
    /// validation fails the whole iteration; an algorithm that simply finds
    /// no path reports a zero path length.
    pub fn run_all(&self, algorithms: &[Algorithm]) -> Result<Vec<RunMetrics>> {
        let instances: Vec<(Algorithm, Grid)> = algorithms
            .iter()
            .map(|&algorithm| (algorithm, self.layout.clone()))
            .collect();

        instances
            .into_par_iter()
            .map(|(algorithm, grid)| run_algorithm(algorithm, grid, self.optimal_path_length))
            .collect()
    }
}

/// Time one algorithm on a grid it owns and extract its metrics.
pub fn run_algorithm(algorithm: Algorithm, mut grid: Grid, optimal_path_length: usize) -> Result<RunMetrics> {
    let (start, end) = (grid.start(), grid.end());

    let heap = memory::heap_region();
    let clock = Instant::now();
    let visited = algorithm.find_path(&mut grid, start, end)?;
    let elapsed = clock.elapsed();
    let heap_change = heap.change();

    let path = match algorithm.reconstruct_path(&grid, end) {
        Ok(path) => path,
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    };

    let open_cells = grid.open_count();
    let metrics = RunMetrics {
        algorithm,
        elapsed,
        visited_nodes: visited.len(),
        visited_percentage: visited.len() as f64 / open_cells as f64 * 100.0,
        path_length: path.len(),
        optimal_path_length,
        memory_used_mib: memory::delta_mib(&heap_change),
    };
    debug!(
        "{}: {} visited, path {} (optimal {}), {:.2?}",
        algorithm, metrics.visited_nodes, metrics.path_length, optimal_path_length, elapsed
    );
    Ok(metrics)
}

/// Shortest path length in cells from the `pathfinding` crate, used as an
/// independent yardstick for the algorithms under test.
pub fn reference_path_length(grid: &Grid) -> usize {
    let end = grid.end();
    bfs(&grid.start(), |p| grid.neighbors(*p), |p| *p == end).map_or(0, |path| path.len())
}
