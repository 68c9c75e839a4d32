use std::collections::VecDeque;
use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::grid::{Direction, Grid, Position, UNREACHABLE};

/// Fraction of eligible interior walls opened in multi-path mode.
pub const DEFAULT_DENSITY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathMode {
    /// Open cells form a spanning tree: one simple path between any two.
    Single,
    /// The spanning tree plus extra openings that close cycles.
    Multi,
}

impl PathMode {
    pub fn from_single_path(single_path: bool) -> Self {
        if single_path {
            PathMode::Single
        } else {
            PathMode::Multi
        }
    }

    pub fn is_single_path(self) -> bool {
        self == PathMode::Single
    }
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMode::Single => write!(f, "single path"),
            PathMode::Multi => write!(f, "multiple paths"),
        }
    }
}

/// How the end cell is chosen once the maze is carved. The start is always
/// the carve origin (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EndpointPolicy {
    /// The lattice cell in the bottom-right corner.
    #[default]
    Corners,
    /// The open cell furthest from the start by hop count.
    Farthest,
}

/// Randomized depth-first maze carver.
///
/// Carving works on the lattice of cells whose row and column are both
/// even; the odd cells between two lattice cells are the walls that get
/// knocked through. A grid dimension that is even leaves its last row or
/// column as solid wall.
pub struct MazeGenerator {
    rng: StdRng,
    density: f64,
    endpoints: EndpointPolicy,
}

impl MazeGenerator {
    /// A seeded generator reproduces the same sequence of mazes; `None`
    /// seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        MazeGenerator {
            rng,
            density: DEFAULT_DENSITY,
            endpoints: EndpointPolicy::default(),
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_endpoints(mut self, endpoints: EndpointPolicy) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn generate(&mut self, rows: usize, cols: usize, mode: PathMode) -> Result<Grid> {
        if rows < 3 || cols < 3 {
            return Err(Error::InvalidSize { rows, cols });
        }
        if !(self.density > 0.0 && self.density <= 1.0) {
            return Err(Error::InvalidDensity(self.density));
        }

        let mut grid = Grid::filled(rows, cols);
        self.carve(&mut grid);

        let extra = match mode {
            PathMode::Single => 0,
            PathMode::Multi => self.open_extra_passages(&mut grid),
        };

        let start = Position::new(0, 0);
        let end = match self.endpoints {
            EndpointPolicy::Corners => Position::new((rows - 1) / 2 * 2, (cols - 1) / 2 * 2),
            EndpointPolicy::Farthest => farthest_from(&grid, start),
        };
        grid.set_endpoints(start, end);

        debug!(
            "generated {}x{} maze with {}: {} open cells, {} extra openings, end {}",
            rows,
            cols,
            mode,
            grid.open_count(),
            extra,
            end
        );
        Ok(grid)
    }

    fn carve(&mut self, grid: &mut Grid) {
        let lattice_rows = (grid.rows() + 1) / 2;
        let lattice_cols = (grid.cols() + 1) / 2;
        let mut carved = vec![false; lattice_rows * lattice_cols];

        grid.open_cell(Position::new(0, 0));
        carved[0] = true;
        let mut stack = vec![(0usize, 0usize)];
        let mut candidates = Vec::with_capacity(4);

        while let Some(&(row, col)) = stack.last() {
            candidates.clear();
            for dir in Direction::SEARCH_ORDER {
                let (dr, dc) = dir.delta();
                let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                else {
                    continue;
                };
                if nr < lattice_rows && nc < lattice_cols && !carved[nr * lattice_cols + nc] {
                    candidates.push((nr, nc));
                }
            }

            match candidates.choose(&mut self.rng) {
                Some(&(nr, nc)) => {
                    carved[nr * lattice_cols + nc] = true;
                    // In grid coordinates the wall between lattice cells
                    // (row, col) and (nr, nc) sits at their sum.
                    grid.open_cell(Position::new(row + nr, col + nc));
                    grid.open_cell(Position::new(2 * nr, 2 * nc));
                    stack.push((nr, nc));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Open a shuffled share of the walls that separate two open lattice
    /// cells. At least one is always opened so the maze has a cycle.
    fn open_extra_passages(&mut self, grid: &mut Grid) -> usize {
        let mut candidates = Vec::new();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let pos = Position::new(row, col);
                if grid.is_open(pos) {
                    continue;
                }
                let joins_two = match (row % 2, col % 2) {
                    (0, 1) => {
                        grid.is_open(Position::new(row, col - 1))
                            && grid.is_open(Position::new(row, col + 1))
                    }
                    (1, 0) => {
                        grid.is_open(Position::new(row - 1, col))
                            && grid.is_open(Position::new(row + 1, col))
                    }
                    _ => false,
                };
                if joins_two {
                    candidates.push(pos);
                }
            }
        }

        candidates.shuffle(&mut self.rng);
        let count = ((candidates.len() as f64 * self.density).ceil() as usize)
            .max(1)
            .min(candidates.len());
        for &pos in &candidates[..count] {
            grid.open_cell(pos);
        }
        count
    }
}

/// The open cell with the greatest hop distance from `start`, lowest index
/// on ties.
fn farthest_from(grid: &Grid, start: Position) -> Position {
    let mut distance = vec![UNREACHABLE; grid.len()];
    let origin = grid.idx(start);
    distance[origin] = 0;
    let mut queue = VecDeque::from([origin]);
    let mut best = origin;

    while let Some(current) = queue.pop_front() {
        let d = distance[current];
        if d > distance[best] || (d == distance[best] && current < best) {
            best = current;
        }
        for next in grid.open_neighbors(current) {
            if distance[next] == UNREACHABLE {
                distance[next] = d + 1;
                queue.push_back(next);
            }
        }
    }
    grid.position(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_edges(grid: &Grid) -> usize {
        grid.open_positions()
            .map(|p| {
                let idx = grid.idx(p);
                [Direction::Down, Direction::Right]
                    .into_iter()
                    .filter_map(|d| grid.step(idx, d))
                    .filter(|&n| !grid.node_at(n).is_wall())
                    .count()
            })
            .sum()
    }

    #[test]
    fn rejects_grids_smaller_than_three() {
        let mut gen = MazeGenerator::new(Some(1));
        assert!(matches!(
            gen.generate(2, 9, PathMode::Single),
            Err(Error::InvalidSize { rows: 2, cols: 9 })
        ));
        assert!(matches!(
            gen.generate(9, 0, PathMode::Multi),
            Err(Error::InvalidSize { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_density() {
        let mut gen = MazeGenerator::new(Some(1)).with_density(0.0);
        assert!(matches!(
            gen.generate(5, 5, PathMode::Multi),
            Err(Error::InvalidDensity(_))
        ));
    }

    #[test]
    fn single_path_maze_is_a_spanning_tree() {
        let mut gen = MazeGenerator::new(Some(7));
        for _ in 0..20 {
            let grid = gen.generate(11, 15, PathMode::Single).unwrap();
            // 6 x 8 lattice cells plus one opened wall per tree edge.
            assert_eq!(grid.open_count(), 48 + 47);
            assert_eq!(open_edges(&grid), grid.open_count() - 1);
        }
    }

    #[test]
    fn corner_endpoints_on_five_by_five() {
        let mut gen = MazeGenerator::new(Some(3));
        let grid = gen.generate(5, 5, PathMode::Single).unwrap();
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.end(), Position::new(4, 4));
        assert!(grid.is_open(grid.start()) && grid.is_open(grid.end()));
    }

    #[test]
    fn even_dimensions_pad_with_a_wall_row_and_column() {
        let mut gen = MazeGenerator::new(Some(11));
        let grid = gen.generate(6, 8, PathMode::Multi).unwrap();
        assert!((0..8).all(|c| grid.is_wall(Position::new(5, c))));
        assert!((0..6).all(|r| grid.is_wall(Position::new(r, 7))));
        assert_eq!(grid.end(), Position::new(4, 6));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(Some(42)).generate(21, 21, PathMode::Multi).unwrap();
        let b = MazeGenerator::new(Some(42)).generate(21, 21, PathMode::Multi).unwrap();
        assert_eq!(a.render(&[]), b.render(&[]));
    }

    #[test]
    fn multi_path_extends_the_same_seed_tree() {
        let single = MazeGenerator::new(Some(5)).generate(15, 15, PathMode::Single).unwrap();
        let multi = MazeGenerator::new(Some(5)).generate(15, 15, PathMode::Multi).unwrap();
        assert!(single.open_positions().all(|p| multi.is_open(p)));
        assert!(multi.open_count() > single.open_count());
        assert!(open_edges(&multi) >= multi.open_count());
    }

    #[test]
    fn farthest_policy_picks_a_deepest_cell() {
        let mut gen = MazeGenerator::new(Some(9)).with_endpoints(EndpointPolicy::Farthest);
        let grid = gen.generate(9, 9, PathMode::Single).unwrap();
        assert_ne!(grid.start(), grid.end());
        assert!(grid.is_open(grid.end()));
        // In a tree the deepest cell is a leaf.
        assert_eq!(grid.neighbors(grid.end()).len(), 1);
    }
}
