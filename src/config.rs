use std::path::PathBuf;

use clap::Parser;

use crate::algorithms::Algorithm;
use crate::maze::{EndpointPolicy, DEFAULT_DENSITY};

/// Benchmark pathfinding algorithms on generated mazes.
///
/// With SIZE and NUM_TESTS a single size is measured; without them the
/// size is swept from --start-size in steps of --step.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Maze side length (rows = cols)
    pub size: Option<usize>,

    /// Test iterations per maze mode
    pub num_tests: Option<usize>,

    /// Filename marker; overrides -n
    #[arg(value_name = "MARKER")]
    pub positional_marker: Option<String>,

    /// Optional filename marker
    #[arg(short = 'n', long = "marker")]
    pub marker: Option<String>,

    #[arg(long, default_value_t = 25)]
    pub start_size: usize,

    #[arg(long, default_value_t = 25)]
    pub step: usize,

    #[arg(long, default_value_t = 500)]
    pub max_size: usize,

    /// Test iterations per mode during a sweep
    #[arg(long, default_value_t = 10)]
    pub sweep_tests: usize,

    /// Base seed; iteration i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of eligible walls opened in multi-path mazes, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    pub density: f64,

    #[arg(long, value_enum, default_value_t = EndpointPolicy::Corners)]
    pub endpoints: EndpointPolicy,

    #[arg(long, value_enum, value_delimiter = ',', default_values_t = Algorithm::ALL)]
    pub algorithms: Vec<Algorithm>,

    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Print one generated maze with its BFS path and exit
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Skip the comparison table on stdout
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn marker(&self) -> Option<&str> {
        self.positional_marker
            .as_deref()
            .or(self.marker.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// `Some((size, num_tests))` when a single run was requested.
    pub fn single_run(&self) -> Option<(usize, usize)> {
        self.size.zip(self.num_tests)
    }

    /// Seed for the `iteration`-th maze of a run, if seeding is enabled.
    pub fn iteration_seed(&self, iteration: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(iteration as u64))
    }
}
