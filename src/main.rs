//! Puzzle engine demo.
//!
//! Generates Sudoku puzzles, solves boards passed on the command line, and
//! animates maze searches in the terminal. This binary owns all rendering
//! and timing; the library only computes.

mod render;

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use puzzlebox::{generator, search, solver, Algorithm, Board, Difficulty, Maze, SearchResult};

/// Generates and solves Sudoku puzzles and mazes.
#[derive(Parser)]
#[command(name = "puzzlebox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a Sudoku puzzle.
    Sudoku {
        /// Puzzle difficulty.
        #[arg(long, value_enum, default_value = "medium")]
        difficulty: DifficultyArg,
        /// RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the solution.
        #[arg(long)]
        solution: bool,
        /// Reveal one random empty cell from the solution.
        #[arg(long)]
        hint: bool,
    },
    /// Solve a board given as 81 characters ('0' or '.' for empty cells).
    Solve {
        board: String,
    },
    /// Generate a maze and animate a search through it.
    Maze {
        /// Side length (odd, at least 5).
        #[arg(long, default_value_t = 21)]
        size: usize,
        /// Traversal to animate.
        #[arg(long, value_enum, default_value = "bfs")]
        algorithm: AlgorithmArg,
        /// RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Delay between animation steps, in milliseconds.
        #[arg(long, default_value_t = 25)]
        delay_ms: u64,
        /// Skip the animation and print only the final maze.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Dfs,
    Bfs,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Dfs => Self::Dfs,
            AlgorithmArg::Bfs => Self::Bfs,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Sudoku {
            difficulty,
            seed,
            solution,
            hint,
        } => run_sudoku(difficulty.into(), seed, solution, hint),
        Command::Solve { board } => run_solve(&board),
        Command::Maze {
            size,
            algorithm,
            seed,
            delay_ms,
            plain,
        } => run_maze(size, algorithm.into(), seed, delay_ms, plain),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_sudoku(difficulty: Difficulty, seed: Option<u64>, show_solution: bool, hint: bool) {
    let mut rng = rng_from(seed);
    let (puzzle, solution) = generator::generate(difficulty, &mut rng);

    println!("{puzzle}");
    if hint {
        let empties: Vec<(usize, usize)> = (0..9)
            .flat_map(|row| (0..9).map(move |col| (row, col)))
            .filter(|&(row, col)| puzzle.value(row, col) == 0)
            .collect();
        let (row, col) = empties[rng.gen_range(0..empties.len())];
        println!(
            "hint: row {}, column {} is {}",
            row + 1,
            col + 1,
            solution.value(row, col)
        );
    }
    if show_solution {
        println!("solution:");
        println!("{solution}");
    }
}

fn run_solve(input: &str) {
    let Some(mut board) = Board::parse(input) else {
        eprintln!("expected 81 characters of digits or '.'");
        std::process::exit(1);
    };

    if solver::solve(&mut board) {
        println!("{board}");
    } else {
        eprintln!("board has no solution");
        std::process::exit(1);
    }
}

fn run_maze(size: usize, algorithm: Algorithm, seed: Option<u64>, delay_ms: u64, plain: bool) {
    let mut rng = rng_from(seed);
    let mut maze = Maze::generate(size, &mut rng);

    let result = if plain {
        let (start, end) = (maze.start(), maze.end());
        search(&mut maze, start, end, algorithm).run()
    } else {
        render::animate(&mut maze, algorithm, Duration::from_millis(delay_ms))
    };

    match result {
        SearchResult::Path(path) => {
            if plain {
                print!("{}", render::draw(&maze));
            }
            println!("path length: {}", path.len());
        }
        SearchResult::NotFound => {
            eprintln!("no path from start to end");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use puzzlebox::{solver, Board};

    #[test]
    fn test_solved_classic_board_rendering() {
        let mut board = Board::parse(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .unwrap();
        assert!(solver::solve(&mut board));

        insta::assert_snapshot!(board.to_string(), @r"
        5 3 4 | 6 7 8 | 9 1 2
        6 7 2 | 1 9 5 | 3 4 8
        1 9 8 | 3 4 2 | 5 6 7
        ------+-------+------
        8 5 9 | 7 6 1 | 4 2 3
        4 2 6 | 8 5 3 | 7 9 1
        7 1 3 | 9 2 4 | 8 5 6
        ------+-------+------
        9 6 1 | 5 3 7 | 2 8 4
        2 8 7 | 4 1 9 | 6 3 5
        3 4 5 | 2 8 6 | 1 7 9
        ");
    }
}
