use clap::Parser;
use env_logger::Env;
use itertools::Itertools;
use log::{info, warn};

use grid_route::config::{Algorithm, Config, DEFAULT_GOAL, DEFAULT_START};
use grid_route::map::{load_endpoints, load_grid, MapSet};
use grid_route::replay::replay_frames;
use grid_route::{
    path_to_commands, AstarSolver, Coordinate, DfsSolver, DirectionalWalk, Error, Grid,
    GridSolver, Path, Result,
};
use std::time::{Duration, Instant};

/// Loads the map named by the configuration together with its endpoints.
fn resolve_inputs(config: &Config) -> Result<(String, Grid, Coordinate, Coordinate)> {
    let (name, grid, start, goal) = match (&config.maps_root, &config.map) {
        (Some(root), _) => {
            let maps = MapSet::discover(root)?;
            let entry = maps
                .choose(&mut rand::thread_rng())
                .ok_or_else(|| Error::NoMaps(root.clone()))?;
            let (grid, start, goal) = entry.load()?;
            (entry.name.clone(), grid, start, goal)
        }
        (None, Some(map)) => {
            let (start, goal) = match &config.notes {
                Some(notes) => load_endpoints(notes)?,
                None => (DEFAULT_START, DEFAULT_GOAL),
            };
            (map.display().to_string(), load_grid(map)?, start, goal)
        }
        (None, None) => return Err(Error::NoMapGiven),
    };
    Ok((
        name,
        grid,
        config.start.unwrap_or(start),
        config.goal.unwrap_or(goal),
    ))
}

fn report(name: &str, path: &Path, elapsed: Duration) -> Result<()> {
    let commands = path_to_commands(path)?;
    if path.is_empty() {
        println!("{} path: none", name);
    } else {
        println!("{} path: {}", name, path.iter().join(" "));
    }
    println!("{} time: {:.2?}", name, elapsed);
    println!("{} commands: [{}]", name, commands.iter().join(", "));
    Ok(())
}

fn replay(grid: &Grid, name: &str, path: &Path, delay: Duration) {
    if path.is_empty() {
        println!("{} found no path, nothing to replay", name);
        return;
    }
    println!("Replaying {} path...", name);
    for frame in replay_frames(grid, path) {
        // Clear the terminal and move the cursor home before drawing the next frame
        print!("\x1B[2J\x1B[H");
        println!("Pathfinding visualization - {}", name);
        print!("{}", frame);
        std::thread::sleep(delay);
    }
    println!("{} replay complete!", name);
}

fn run(config: Config) -> Result<()> {
    let (name, mut grid, start, goal) = resolve_inputs(&config)?;
    grid.mark_endpoints(start, goal)?;
    println!("Start: {}", start);
    println!("Goal: {}", goal);
    println!("Map: {}", name);
    print!("{}", grid);

    let solvers: Vec<(Algorithm, Box<dyn GridSolver>)> = vec![
        (Algorithm::Astar, Box::new(AstarSolver::new())),
        (Algorithm::Dfs, Box::new(DfsSolver::new())),
    ];
    let mut results: Vec<(&'static str, Path)> = Vec::new();
    for (algorithm, solver) in solvers {
        if !config.runs(algorithm) {
            continue;
        }
        let started = Instant::now();
        let path = solver.find_path(&grid, start, goal);
        report(solver.name(), &path, started.elapsed())?;
        results.push((solver.name(), path));
    }

    if config.runs(Algorithm::Walk) {
        let walk = DirectionalWalk::new(config.walk_steps);
        let started = Instant::now();
        match walk.run(&grid, start, goal) {
            Ok(path) => {
                report(walk.name(), &path, started.elapsed())?;
                results.push((walk.name(), path));
            }
            Err(e @ (Error::WalkStuck { .. } | Error::WalkExhausted { .. })) => {
                warn!("{} did not reach the goal: {}", walk.name(), e);
            }
            Err(e) => return Err(e),
        }
    }

    if config.no_visualization {
        info!("Visualization disabled");
        return Ok(());
    }
    let delay = Duration::from_millis(config.delay_ms);
    for (name, path) in &results {
        replay(&grid, name, path, delay);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = Config::parse();
    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
