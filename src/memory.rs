//! Heap accounting for the per-run memory metric.
//!
//! The binary installs [`INSTRUMENTED_SYSTEM`] as its global allocator. The
//! counters are process-wide, so when several algorithms run at once each
//! delta also sees its siblings' allocations. Treat the figure as an
//! observation, never as an input to anything.

use std::alloc::System;

pub use stats_alloc::{Region, Stats, StatsAlloc, INSTRUMENTED_SYSTEM};

/// Start measuring. Every counter stays at zero when the instrumented
/// allocator is not installed.
pub fn heap_region() -> Region<'static, System> {
    Region::new(&INSTRUMENTED_SYSTEM)
}

/// Net bytes still held at the end of a region, in MiB. Negative when the
/// region freed more than it allocated.
pub fn delta_mib(change: &Stats) -> f64 {
    let net = change.bytes_allocated as f64 - change.bytes_deallocated as f64
        + change.bytes_reallocated as f64;
    net / (1024.0 * 1024.0)
}
