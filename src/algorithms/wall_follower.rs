use crate::algorithms::common::{prepare, PathfindingAlgorithm};
use crate::error::Result;
use crate::grid::{Direction, Grid, Position};

/// Right-hand wall follower.
///
/// At every step the walker tries to turn right, then go straight, then
/// left, then back. It only sees its immediate surroundings, so it is
/// guaranteed to finish on simply-connected mazes. A repeated
/// (cell, heading) pair means it is circling a wall island and gives up.
///
/// `visited` records each cell on first arrival, and the predecessor is the
/// cell it first arrived from.
#[derive(Debug, Clone, Copy)]
pub struct WallFollower {
    initial_heading: Direction,
}

impl Default for WallFollower {
    fn default() -> Self {
        WallFollower {
            initial_heading: Direction::Down,
        }
    }
}

impl PathfindingAlgorithm for WallFollower {
    fn find_path(&self, grid: &mut Grid, start: Position, end: Position) -> Result<Vec<Position>> {
        let (source, target) = prepare(grid, start, end)?;

        let node = grid.node_at_mut(source);
        node.visited = true;
        node.distance = 0;
        let mut visited_in_order = vec![start];
        if source == target {
            return Ok(visited_in_order);
        }

        let mut seen = vec![false; grid.len() * 4];
        let mut heading = self.initial_heading;
        let mut current = source;

        loop {
            let candidates = [
                heading.turn_right(),
                heading,
                heading.turn_left(),
                heading.reverse(),
            ];
            let Some((dir, next)) = candidates.into_iter().find_map(|dir| {
                grid.step(current, dir)
                    .filter(|&n| !grid.node_at(n).is_wall())
                    .map(|n| (dir, n))
            }) else {
                // Start is boxed in.
                break;
            };

            let state = current * 4 + dir.index();
            if seen[state] {
                break;
            }
            seen[state] = true;
            heading = dir;

            if !grid.node_at(next).visited {
                let distance = grid.node_at(current).distance + 1;
                let node = grid.node_at_mut(next);
                node.visited = true;
                node.previous = Some(current);
                node.distance = distance;
                visited_in_order.push(grid.position(next));
                if next == target {
                    break;
                }
            }
            current = next;
        }

        Ok(visited_in_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_a_tree_maze() {
        let mut grid = Grid::parse(
            "
            S.#..
            #.#.#
            ...#.
            .#...
            .#.#E
            ",
        )
        .unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = WallFollower::default().find_path(&mut grid, start, end).unwrap();
        assert_eq!(visited.last(), Some(&end));

        let path = grid.reconstruct_path(end);
        assert_eq!(path.first(), Some(&start));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn gives_up_when_circling_an_island() {
        // The end is walled in; the walker laps the outer ring once.
        let mut grid = Grid::parse(
            "
            S....
            .###.
            .#E#.
            .###.
            .....
            ",
        )
        .unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = WallFollower::default().find_path(&mut grid, start, end).unwrap();
        assert_eq!(visited.len(), 16);
        assert!(grid.reconstruct_path(end).is_empty());
    }

    #[test]
    fn boxed_in_start_returns_only_itself() {
        let mut grid = Grid::parse(
            "
            S#.
            ##.
            ..E
            ",
        )
        .unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = WallFollower::default().find_path(&mut grid, start, end).unwrap();
        assert_eq!(visited, vec![start]);
    }
}
