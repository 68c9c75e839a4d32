pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod dijkstra;
pub mod wall_follower;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::grid::{Grid, Position};

pub use a_star::AStar;
pub use bfs::BreadthFirst;
pub use common::PathfindingAlgorithm;
pub use dfs::DepthFirst;
pub use dijkstra::Dijkstra;
pub use wall_follower::WallFollower;

/// The closed set of strategies the benchmark compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Algorithm {
    #[value(name = "dijkstra")]
    Dijkstra,
    #[value(name = "astar")]
    AStar,
    #[value(name = "bfs")]
    Bfs,
    #[value(name = "dfs")]
    Dfs,
    #[value(name = "wallFollower")]
    WallFollower,
}

impl Algorithm {
    /// Every algorithm, in report order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::WallFollower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::WallFollower => "wallFollower",
        }
    }

    /// Whether the algorithm always returns a shortest path when one exists.
    pub fn is_optimal(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar | Algorithm::Bfs)
    }

    pub fn find_path(self, grid: &mut Grid, start: Position, end: Position) -> Result<Vec<Position>> {
        match self {
            Algorithm::Dijkstra => Dijkstra.find_path(grid, start, end),
            Algorithm::AStar => AStar::new().find_path(grid, start, end),
            Algorithm::Bfs => BreadthFirst.find_path(grid, start, end),
            Algorithm::Dfs => DepthFirst.find_path(grid, start, end),
            Algorithm::WallFollower => WallFollower::default().find_path(grid, start, end),
        }
    }

    /// Run on the grid's own endpoints.
    pub fn solve(self, grid: &mut Grid) -> Result<Vec<Position>> {
        let (start, end) = (grid.start(), grid.end());
        self.find_path(grid, start, end)
    }

    /// The path recorded by the last run on `grid`, or `NoPathFound`.
    pub fn reconstruct_path(self, grid: &Grid, end: Position) -> Result<Vec<Position>> {
        let path = grid.reconstruct_path(end);
        if path.is_empty() {
            return Err(Error::NoPathFound {
                algorithm: self.name().to_string(),
            });
        }
        Ok(path)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown algorithm '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert!("greedy".parse::<Algorithm>().is_err());
    }

    #[test]
    fn malformed_endpoints_fail_before_searching() {
        let mut grid = Grid::parse(
            "
            S#
            .E
            ",
        )
        .unwrap();
        for algorithm in Algorithm::ALL {
            let err = algorithm
                .find_path(&mut grid, Position::new(0, 1), Position::new(1, 1))
                .unwrap_err();
            assert!(matches!(err, Error::MalformedGrid(_)), "{}", algorithm);
        }
    }

    #[test]
    fn missing_path_is_reported_by_name() {
        let mut grid = Grid::parse(
            "
            S#.
            ##E
            ",
        )
        .unwrap();
        for algorithm in Algorithm::ALL {
            algorithm.solve(&mut grid).unwrap();
            match algorithm.reconstruct_path(&grid, grid.end()) {
                Err(Error::NoPathFound { algorithm: name }) => assert_eq!(name, algorithm.name()),
                other => panic!("expected NoPathFound, got {:?}", other),
            }
        }
    }
}
