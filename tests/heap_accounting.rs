//! Runs with the same global allocator the binary installs. Kept to a single
//! test so no sibling test thread allocates inside the measured regions.

use std::alloc::System;

use maze_pathfinding::memory::{self, StatsAlloc, INSTRUMENTED_SYSTEM};
use maze_pathfinding::simulation::run_algorithm;
use maze_pathfinding::{Algorithm, MazeGenerator, PathMode};

#[global_allocator]
static ALLOCATOR: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

#[test]
fn heap_delta_reflects_live_allocations() {
    let region = memory::heap_region();
    let block = vec![1u8; 4 * 1024 * 1024];
    let held = memory::delta_mib(&region.change());
    assert!(held >= 3.99, "4 MiB block reported as {held} MiB");

    let region = memory::heap_region();
    drop(block);
    let released = memory::delta_mib(&region.change());
    assert!(released <= -3.99, "freed block reported as {released} MiB");

    // The visited list is still alive when the run's region closes.
    let grid = MazeGenerator::new(Some(5))
        .generate(101, 101, PathMode::Single)
        .unwrap();
    let metrics = run_algorithm(Algorithm::Bfs, grid, 0).unwrap();
    assert!(metrics.visited_nodes > 0);
    assert!(metrics.memory_used_mib > 0.0, "run reported {} MiB", metrics.memory_used_mib);
}
