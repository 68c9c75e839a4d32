use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::maze::{MazeGenerator, PathMode};
use crate::simulation::Simulation;
use crate::statistics::Statistics;

const CSV_HEADER: &str =
    "Algorithm,SinglePath,Time [ms],VisitedNodes,VisitedPercentage [%],PathLength,MemoryUsed [MB]";

/// Averages for both maze modes at one size, and where they were written.
#[derive(Debug, Clone)]
pub struct SizeReport {
    pub size: usize,
    pub num_tests: usize,
    pub output_file: PathBuf,
    pub single_path: Statistics,
    pub multi_path: Statistics,
}

/// Drives test iterations across one size or a sweep of sizes and writes
/// one CSV of averages per size.
pub struct BatchSimulation {
    config: Config,
    reports: Vec<SizeReport>,
    start_time: Instant,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Self {
        BatchSimulation {
            config,
            reports: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn reports(&self) -> &[SizeReport] {
        &self.reports
    }

    /// A single size when one was requested, otherwise the sweep.
    ///
    /// A failure on a single size is returned. During the sweep a failing
    /// size is logged and ends the sweep, keeping the sizes already written.
    pub fn run(&mut self) -> Result<()> {
        if let Some((size, num_tests)) = self.config.single_run() {
            let report = self.run_size(size, num_tests)?;
            self.reports.push(report);
            return Ok(());
        }

        let step = self.config.step.max(1);
        let mut size = self.config.start_size;
        while size <= self.config.max_size {
            info!("Running tests with maze size {}", size);
            match self.run_size(size, self.config.sweep_tests) {
                Ok(report) => self.reports.push(report),
                Err(e) => {
                    error!("Test failed for maze size {}: {}", size, e);
                    break;
                }
            }
            size += step;
        }
        info!(
            "Sweep finished: {} sizes in {:.1}s",
            self.reports.len(),
            self.start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// `num_tests` single-path iterations, then `num_tests` multi-path ones.
    pub fn run_size(&self, size: usize, num_tests: usize) -> Result<SizeReport> {
        let single_path = self.run_mode(size, num_tests, PathMode::Single)?;
        let multi_path = self.run_mode(size, num_tests, PathMode::Multi)?;

        fs::create_dir_all(&self.config.output_dir)?;
        let output_file = self
            .config
            .output_dir
            .join(output_file_name(size, size, num_tests, self.config.marker()));
        write_results_csv(&output_file, &single_path, &multi_path)?;
        info!("Wrote {}", output_file.display());

        Ok(SizeReport {
            size,
            num_tests,
            output_file,
            single_path,
            multi_path,
        })
    }

    fn run_mode(&self, size: usize, num_tests: usize, path_mode: PathMode) -> Result<Statistics> {
        let mut statistics = Statistics::new(path_mode);
        for i in 0..num_tests {
            // Same seed for both modes, so multi-path maze i extends the tree
            // of single-path maze i.
            let mut generator = MazeGenerator::new(self.config.iteration_seed(i))
                .with_density(self.config.density)
                .with_endpoints(self.config.endpoints);
            let simulation = Simulation::generate(&mut generator, size, size, path_mode)?;
            for run in simulation.run_all(&self.config.algorithms)? {
                statistics.record(&run);
            }
            info!(
                "Completed test {} of {} for mazes with {}, for size: {}",
                i + 1,
                num_tests,
                path_mode,
                size
            );
        }
        Ok(statistics)
    }

    pub fn print_summary(&self) {
        if self.reports.is_empty() {
            println!("No results to summarize.");
            return;
        }
        for report in &self.reports {
            println!(
                "\n=== {}x{} maze, {} tests per mode -> {} ===",
                report.size,
                report.size,
                report.num_tests,
                report.output_file.display()
            );
            println!("{}", report.single_path);
            println!("{}", report.multi_path);
        }
    }
}

/// `averages{rows}x{cols}x{num_tests}[x{marker}].csv`
pub fn output_file_name(rows: usize, cols: usize, num_tests: usize, marker: Option<&str>) -> String {
    match marker {
        Some(marker) => format!("averages{}x{}x{}x{}.csv", rows, cols, num_tests, marker),
        None => format!("averages{}x{}x{}.csv", rows, cols, num_tests),
    }
}

/// Single-path rows first, then multi-path, each in report order.
pub fn write_results_csv(path: &Path, single_path: &Statistics, multi_path: &Statistics) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{}", CSV_HEADER)?;
    for statistics in [single_path, multi_path] {
        for (algorithm, avg) in statistics.averages() {
            writeln!(
                file,
                "{},{},{:.3},{:.0},{:.2},{:.0},{:.2}",
                algorithm.name(),
                statistics.path_mode.is_single_path(),
                avg.time_ms,
                avg.visited_nodes,
                avg.visited_percentage,
                avg.path_length,
                avg.memory_used_mib
            )?;
        }
    }
    file.flush()?;
    Ok(())
}
