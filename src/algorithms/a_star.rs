use std::collections::BinaryHeap;

use crate::algorithms::common::{prepare, PathfindingAlgorithm, QueueEntry};
use crate::error::Result;
use crate::grid::{Grid, Position};

/// A* search with the Manhattan distance to `end` as heuristic.
///
/// The heap is keyed by `g + h`; ties go to the cell closer to the goal,
/// then to the one discovered first. Manhattan distance is consistent on a
/// 4-connected unit-cost grid, so a settled cell is never reopened.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }
}

impl PathfindingAlgorithm for AStar {
    fn find_path(&self, grid: &mut Grid, start: Position, end: Position) -> Result<Vec<Position>> {
        let (source, target) = prepare(grid, start, end)?;

        let mut visited_in_order = Vec::new();
        let mut open = BinaryHeap::new();
        let mut seq = 0u64;

        let h = start.manhattan(end);
        let node = grid.node_at_mut(source);
        node.distance = 0;
        node.heuristic = h;
        open.push(QueueEntry {
            priority: h,
            tie: h,
            seq,
            idx: source,
        });
        let mut nbuf = Vec::with_capacity(4);

        while let Some(entry) = open.pop() {
            let current = entry.idx;
            if grid.node_at(current).visited {
                continue;
            }
            grid.node_at_mut(current).visited = true;
            visited_in_order.push(grid.position(current));
            if current == target {
                break;
            }

            let tentative = grid.node_at(current).distance + 1;
            nbuf.clear();
            nbuf.extend(grid.open_neighbors(current));
            for &n in &nbuf {
                let h = grid.position(n).manhattan(end);
                let node = grid.node_at_mut(n);
                if node.visited || tentative >= node.distance {
                    continue;
                }
                node.distance = tentative;
                node.heuristic = h;
                node.previous = Some(current);
                seq += 1;
                open.push(QueueEntry {
                    priority: tentative + h,
                    tie: h,
                    seq,
                    idx: n,
                });
            }
        }

        Ok(visited_in_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dijkstra::Dijkstra;

    #[test]
    fn open_field_goes_straight_for_the_goal() {
        let mut grid = Grid::parse(
            "
            S....
            .....
            .....
            .....
            ....E
            ",
        )
        .unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = AStar::new().find_path(&mut grid, start, end).unwrap();
        // Lower h wins an f tie, so the search runs down the first column and
        // then along the bottom row without settling anything off the path.
        let expected: Vec<Position> = [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (4, 1), (4, 2), (4, 3), (4, 4)]
            .into_iter()
            .map(|(r, c)| Position::new(r, c))
            .collect();
        assert_eq!(visited, expected);
        assert_eq!(grid.reconstruct_path(end).len(), 9);
        assert_eq!(grid.node(end).heuristic, 0);
    }

    #[test]
    fn settles_no_more_than_dijkstra() {
        let text = "
            S.........
            ########..
            ..........
            ..########
            .........E
        ";
        let mut a = Grid::parse(text).unwrap();
        let mut d = a.clone();
        let (start, end) = (a.start(), a.end());
        let a_visited = AStar::new().find_path(&mut a, start, end).unwrap();
        let d_visited = Dijkstra.find_path(&mut d, start, end).unwrap();
        assert!(a_visited.len() <= d_visited.len());
        assert_eq!(a.node(end).distance, d.node(end).distance);
    }
}
