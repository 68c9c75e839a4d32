use std::collections::VecDeque;

use crate::algorithms::common::{prepare, PathfindingAlgorithm};
use crate::error::Result;
use crate::grid::{Grid, Position, UNREACHABLE};

/// Breadth-first search. Settles cells layer by layer, so the first time
/// `end` is dequeued it is at its minimum hop count.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl PathfindingAlgorithm for BreadthFirst {
    fn find_path(&self, grid: &mut Grid, start: Position, end: Position) -> Result<Vec<Position>> {
        let (source, target) = prepare(grid, start, end)?;

        let mut visited_in_order = Vec::new();
        let mut queue = VecDeque::from([source]);
        grid.node_at_mut(source).distance = 0;
        let mut nbuf = Vec::with_capacity(4);

        while let Some(current) = queue.pop_front() {
            grid.node_at_mut(current).visited = true;
            visited_in_order.push(grid.position(current));
            if current == target {
                break;
            }

            let next_distance = grid.node_at(current).distance + 1;
            nbuf.clear();
            nbuf.extend(grid.open_neighbors(current));
            for &n in &nbuf {
                let node = grid.node_at_mut(n);
                // Discovered already; the first discovery is the shortest.
                if node.distance != UNREACHABLE {
                    continue;
                }
                node.distance = next_distance;
                node.previous = Some(current);
                queue.push_back(n);
            }
        }

        Ok(visited_in_order)
    }
}
