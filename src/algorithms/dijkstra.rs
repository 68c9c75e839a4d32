use std::collections::BinaryHeap;

use crate::algorithms::common::{prepare, PathfindingAlgorithm, QueueEntry};
use crate::error::Result;
use crate::grid::{Grid, Position};

/// Dijkstra's algorithm over unit-cost edges.
///
/// Cells come off the heap in ascending distance; equal distances come off
/// in discovery order, which keeps runs reproducible on identical grids.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl PathfindingAlgorithm for Dijkstra {
    fn find_path(&self, grid: &mut Grid, start: Position, end: Position) -> Result<Vec<Position>> {
        let (source, target) = prepare(grid, start, end)?;

        let mut visited_in_order = Vec::new();
        let mut open = BinaryHeap::new();
        let mut seq = 0u64;
        grid.node_at_mut(source).distance = 0;
        open.push(QueueEntry {
            priority: 0,
            tie: 0,
            seq,
            idx: source,
        });
        let mut nbuf = Vec::with_capacity(4);

        while let Some(entry) = open.pop() {
            let current = entry.idx;
            // Stale entry for a cell that was already settled.
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
                let node = grid.node_at_mut(n);
                if node.visited || tentative >= node.distance {
                    continue;
                }
                node.distance = tentative;
                node.previous = Some(current);
                seq += 1;
                open.push(QueueEntry {
                    priority: tentative,
                    tie: 0,
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
    use crate::algorithms::bfs::BreadthFirst;

    const LOOP: &str = "
        S....
        .###.
        .....
        .#.#.
        ....E
    ";

    #[test]
    fn matches_breadth_first_on_unit_costs() {
        let mut a = Grid::parse(LOOP).unwrap();
        let mut b = a.clone();
        let (start, end) = (a.start(), a.end());
        Dijkstra.find_path(&mut a, start, end).unwrap();
        BreadthFirst.find_path(&mut b, start, end).unwrap();
        assert_eq!(a.reconstruct_path(end).len(), 9);
        assert_eq!(a.node(end).distance, b.node(end).distance);
    }

    #[test]
    fn visit_order_is_non_decreasing_in_distance() {
        let mut grid = Grid::parse(LOOP).unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = Dijkstra.find_path(&mut grid, start, end).unwrap();
        let distances: Vec<u32> = visited.iter().map(|&p| grid.node(p).distance).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn equal_distances_settle_in_discovery_order() {
        let mut grid = Grid::parse(
            "
            S..
            ...
            ..E
            ",
        )
        .unwrap();
        let (start, end) = (grid.start(), grid.end());
        let visited = Dijkstra.find_path(&mut grid, start, end).unwrap();
        let expected: Vec<Position> = [(0, 0), (1, 0), (0, 1), (2, 0), (1, 1), (0, 2), (2, 1), (1, 2), (2, 2)]
            .into_iter()
            .map(|(r, c)| Position::new(r, c))
            .collect();
        assert_eq!(visited, expected);
    }
}
