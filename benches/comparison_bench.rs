use criterion::{criterion_group, criterion_main, Criterion};
use grid_route::{
    AstarSolver, CellState, Coordinate, DfsSolver, DirectionalWalk, Grid, GridSolver,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: usize = 64;
const N_SCENARIOS: usize = 32;

/// A random grid with a fraction of blocked cells, together with start and goal pairs that
/// lie on the same connected component.
fn random_scenarios(blocked: f64) -> (Grid, Vec<(Coordinate, Coordinate)>) {
    let mut rng = StdRng::seed_from_u64(0);
    let cells = (0..N)
        .map(|_| {
            (0..N)
                .map(|_| {
                    if rng.gen_bool(blocked) {
                        CellState::Blocked
                    } else {
                        CellState::Free
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let grid = Grid::from_rows(cells).unwrap();
    let mut scenarios = Vec::new();
    while scenarios.len() < N_SCENARIOS {
        let mut random_point = || {
            Coordinate::new(
                rng.gen_range(0..N as i32),
                rng.gen_range(0..N as i32),
            )
        };
        let (start, goal) = (random_point(), random_point());
        if grid.is_free(start) && grid.reachable(&start, &goal) {
            scenarios.push((start, goal));
        }
    }
    (grid, scenarios)
}

fn bench_solver<S: GridSolver>(c: &mut Criterion, solver: S) {
    for blocked in [0.1, 0.3] {
        let (grid, scenarios) = random_scenarios(blocked);
        c.bench_function(
            format!("{}, {N}x{N}, {}% blocked", solver.name(), blocked * 100.0).as_str(),
            |b| {
                b.iter(|| {
                    for (start, goal) in &scenarios {
                        black_box(solver.find_path(&grid, *start, *goal));
                    }
                })
            },
        );
    }
}

fn random_bench_astar(c: &mut Criterion) {
    bench_solver(c, AstarSolver::new());
}

fn random_bench_dfs(c: &mut Criterion) {
    bench_solver(c, DfsSolver::new());
}

fn random_bench_walk(c: &mut Criterion) {
    let (grid, scenarios) = random_scenarios(0.1);
    let walk = DirectionalWalk::default();
    c.bench_function(format!("walk, {N}x{N}, 10% blocked").as_str(), |b| {
        b.iter(|| {
            for (start, goal) in &scenarios {
                let _ = black_box(walk.run(&grid, *start, *goal));
            }
        })
    });
}

criterion_group!(
    benches,
    random_bench_astar,
    random_bench_dfs,
    random_bench_walk
);
criterion_main!(benches);
