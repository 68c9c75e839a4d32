use std::alloc::System;

use clap::Parser;
use log::error;

use maze_pathfinding::batch_simulation::BatchSimulation;
use maze_pathfinding::config::Config;
use maze_pathfinding::memory::{StatsAlloc, INSTRUMENTED_SYSTEM};
use maze_pathfinding::{Algorithm, MazeGenerator, PathMode, Result};

#[global_allocator]
static ALLOCATOR: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

fn main() {
    let env = env_logger::Env::new()
        .filter_or("MAZE_LOG", "info")
        .write_style("MAZE_LOG_STYLE");
    env_logger::init_from_env(env);

    let config = Config::parse();
    log::debug!("options: {:?}", config);

    let outcome = if config.show {
        show_maze(&config)
    } else {
        run_batch(config)
    };

    if let Err(e) = outcome {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run_batch(config: Config) -> Result<()> {
    let quiet = config.quiet;
    let mut batch = BatchSimulation::new(config);
    batch.run()?;
    if !quiet {
        batch.print_summary();
    }
    Ok(())
}

/// Print one single-path maze with the BFS path drawn on it.
fn show_maze(config: &Config) -> Result<()> {
    let size = config.size.unwrap_or(config.start_size);
    let mut generator = MazeGenerator::new(config.seed)
        .with_density(config.density)
        .with_endpoints(config.endpoints);
    let mut grid = generator.generate(size, size, PathMode::Single)?;

    let visited = Algorithm::Bfs.solve(&mut grid)?;
    let path = Algorithm::Bfs.reconstruct_path(&grid, grid.end())?;
    println!("{}", grid.render(&path));
    println!(
        "Start: {} End: {} Visited: {} Path length: {}",
        grid.start(),
        grid.end(),
        visited.len(),
        path.len()
    );
    Ok(())
}
