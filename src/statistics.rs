use std::fmt;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::algorithms::Algorithm;
use crate::maze::PathMode;

/// What one algorithm did on one grid.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
    pub visited_nodes: usize,
    pub visited_percentage: f64,
    /// Cells on the reconstructed path, endpoints included; 0 when no path.
    pub path_length: usize,
    /// Cells on a shortest path, from the reference solver.
    pub optimal_path_length: usize,
    pub memory_used_mib: f64,
}

impl RunMetrics {
    pub fn success(&self) -> bool {
        self.path_length > 0
    }

    /// Path moves over shortest-path moves; 1.0 is optimal, 0.0 on failure.
    pub fn route_efficiency(&self) -> f64 {
        if self.success() && self.optimal_path_length > 1 {
            (self.path_length - 1) as f64 / (self.optimal_path_length - 1) as f64
        } else {
            0.0
        }
    }
}

/// Raw samples for one algorithm across a set of test iterations.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    time_ns: Vec<f64>,
    visited_nodes: Vec<usize>,
    visited_percentage: Vec<f64>,
    path_length: Vec<usize>,
    memory_used_mib: Vec<f64>,
    route_efficiency: Vec<f64>,
}

impl Metrics {
    pub fn record(&mut self, run: &RunMetrics) {
        self.time_ns.push(run.elapsed.as_nanos() as f64);
        self.visited_nodes.push(run.visited_nodes);
        self.visited_percentage.push(run.visited_percentage);
        self.path_length.push(run.path_length);
        self.memory_used_mib.push(run.memory_used_mib);
        if run.success() {
            self.route_efficiency.push(run.route_efficiency());
        }
    }

    pub fn runs(&self) -> usize {
        self.time_ns.len()
    }

    pub fn averages(&self) -> Averages {
        Averages {
            time_ms: mean(&self.time_ns) / 1e6,
            visited_nodes: mean_usize(&self.visited_nodes),
            visited_percentage: mean(&self.visited_percentage),
            path_length: mean_usize(&self.path_length),
            memory_used_mib: mean(&self.memory_used_mib),
            success_rate: if self.runs() == 0 {
                0.0
            } else {
                self.route_efficiency.len() as f64 / self.runs() as f64 * 100.0
            },
            route_efficiency: mean(&self.route_efficiency),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn mean_usize(values: &[usize]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<usize>() as f64 / values.len() as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Averages {
    pub time_ms: f64,
    pub visited_nodes: f64,
    pub visited_percentage: f64,
    pub path_length: f64,
    pub memory_used_mib: f64,
    /// Share of runs that reached the end, in percent.
    pub success_rate: f64,
    /// Mean over successful runs only.
    pub route_efficiency: f64,
}

/// Per-algorithm samples for one maze mode at one size.
#[derive(Debug, Clone)]
pub struct Statistics {
    pub path_mode: PathMode,
    per_algorithm: FxHashMap<Algorithm, Metrics>,
}

impl Statistics {
    pub fn new(path_mode: PathMode) -> Self {
        Statistics {
            path_mode,
            per_algorithm: FxHashMap::default(),
        }
    }

    pub fn record(&mut self, run: &RunMetrics) {
        self.per_algorithm.entry(run.algorithm).or_default().record(run);
    }

    pub fn metrics(&self, algorithm: Algorithm) -> Option<&Metrics> {
        self.per_algorithm.get(&algorithm)
    }

    /// Averages in report order, skipping algorithms that never ran.
    pub fn averages(&self) -> Vec<(Algorithm, Averages)> {
        Algorithm::ALL
            .into_iter()
            .filter_map(|a| self.per_algorithm.get(&a).map(|m| (a, m.averages())))
            .collect()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mazes with {}:", self.path_mode)?;
        writeln!(
            f,
            "{:<14} {:>10} {:>10} {:>9} {:>8} {:>9} {:>11} {:>10}",
            "Algorithm", "Time [ms]", "Visited", "Visited%", "Path", "Success%", "Efficiency", "Mem [MB]"
        )?;
        writeln!(f, "{}", "-".repeat(88))?;
        for (algorithm, avg) in self.averages() {
            writeln!(
                f,
                "{:<14} {:>10.3} {:>10.0} {:>9.2} {:>8.0} {:>9.1} {:>11.3} {:>10.2}",
                algorithm.name(),
                avg.time_ms,
                avg.visited_nodes,
                avg.visited_percentage,
                avg.path_length,
                avg.success_rate,
                avg.route_efficiency,
                avg.memory_used_mib
            )?;
        }
        Ok(())
    }
}
