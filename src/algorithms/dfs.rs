use crate::algorithms::common::{prepare, PathfindingAlgorithm};
use crate::error::Result;
use crate::grid::{Grid, Position};

/// Depth-first search with an explicit stack.
///
/// The predecessor is fixed when a cell is popped and settled, not when it
/// is pushed, so the recorded path is the branch that actually reached it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirst;

impl PathfindingAlgorithm for DepthFirst {
    fn find_path(&self, grid: &mut Grid, start: Position, end: Position) -> Result<Vec<Position>> {
        let (source, target) = prepare(grid, start, end)?;

        let mut visited_in_order = Vec::new();
        let mut stack: Vec<(usize, Option<usize>)> = vec![(source, None)];
        let mut nbuf = Vec::with_capacity(4);

        while let Some((current, from)) = stack.pop() {
            if grid.node_at(current).visited {
                continue;
            }
            let distance = from.map_or(0, |f| grid.node_at(f).distance + 1);
            let node = grid.node_at_mut(current);
            node.visited = true;
            node.previous = from;
            node.distance = distance;
            visited_in_order.push(grid.position(current));
            if current == target {
                break;
            }

            nbuf.clear();
            nbuf.extend(
                grid.open_neighbors(current)
                    .filter(|&n| !grid.node_at(n).visited),
            );
            // Reversed so the first neighbour in search order is explored first.
            for &n in nbuf.iter().rev() {
                stack.push((n, Some(current)));
            }
        }

        Ok(visited_in_order)
    }
}
