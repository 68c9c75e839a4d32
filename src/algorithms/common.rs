use crate::error::Result;
use crate::grid::{Grid, Position};
use std::cmp::Ordering;

pub trait PathfindingAlgorithm {
    /// Explore `grid` from `start` until `end` is settled or the frontier
    /// runs dry.
    ///
    /// Returns the cells in the order they were settled. Every settled
    /// cell gets its `previous` link set, so the path can be recovered with
    /// [`Grid::reconstruct_path`]. Fails only when an endpoint is out of
    /// bounds or a wall.
    fn find_path(&self, grid: &mut Grid, start: Position, end: Position) -> Result<Vec<Position>>;
}

/// Validate the endpoints and wipe any previous run's bookkeeping.
pub(crate) fn prepare(grid: &mut Grid, start: Position, end: Position) -> Result<(usize, usize)> {
    let endpoints = grid.validate_endpoints(start, end)?;
    grid.reset_search();
    Ok(endpoints)
}

/// Priority-queue entry for the cost-ordered searches.
///
/// Ordered by `priority`, then `tie`, then `seq` (insertion order), all
/// ascending. `Ord` is reversed so `BinaryHeap` pops the smallest first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct QueueEntry {
    pub priority: u32,
    pub tie: u32,
    pub seq: u64,
    pub idx: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.tie.cmp(&self.tie))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_lowest_priority_then_tie_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { priority: 4, tie: 0, seq: 0, idx: 0 });
        heap.push(QueueEntry { priority: 3, tie: 2, seq: 1, idx: 1 });
        heap.push(QueueEntry { priority: 3, tie: 1, seq: 3, idx: 2 });
        heap.push(QueueEntry { priority: 3, tie: 1, seq: 2, idx: 3 });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![3, 2, 1, 0]);
    }
}
