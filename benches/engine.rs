//! Benchmarks for the puzzle engines.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use puzzlebox::{generator, search, solver, Algorithm, Board, Difficulty, Maze};

const CLASSIC: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// Benchmark solving the classical example puzzle.
fn bench_solve_classic(c: &mut Criterion) {
    let board = Board::parse(CLASSIC).unwrap();

    c.bench_function("solve_classic", |b| {
        b.iter(|| {
            let mut board = black_box(&board).clone();
            solver::solve(&mut board)
        })
    });
}

/// Benchmark generating a hard puzzle from scratch.
fn bench_generate_hard(c: &mut Criterion) {
    c.bench_function("generate_hard", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            generator::generate(black_box(Difficulty::Hard), &mut rng)
        })
    });
}

/// Benchmark carving a 41x41 maze.
fn bench_generate_maze(c: &mut Criterion) {
    c.bench_function("generate_maze_41", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            Maze::generate(black_box(41), &mut rng)
        })
    });
}

/// Benchmark a full BFS drain, events included.
fn bench_bfs_drain(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let maze = Maze::generate(41, &mut rng);

    c.bench_function("bfs_drain_41", |b| {
        b.iter(|| {
            let mut maze = black_box(&maze).clone();
            let (start, end) = (maze.start(), maze.end());
            search(&mut maze, start, end, Algorithm::Bfs).run()
        })
    });
}

criterion_group!(
    benches,
    bench_solve_classic,
    bench_generate_hard,
    bench_generate_maze,
    bench_bfs_drain
);
criterion_main!(benches);
