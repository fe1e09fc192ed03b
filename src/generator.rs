//! Sudoku board and puzzle generation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Difficulty, BOX_SIZE, SIZE};
use crate::solver;

/// Generates a complete valid board.
///
/// The three diagonal 3x3 boxes share no row, column, or box, so each is
/// filled with an independent random permutation of 1..=9; the remainder
/// is then completed deterministically by the backtracking solver. All
/// randomness enters through the three permutations.
pub fn complete_board<R: Rng>(rng: &mut R) -> Board {
    let mut board = Board::empty();
    for start in (0..SIZE).step_by(BOX_SIZE) {
        fill_box(&mut board, start, start, rng);
    }

    let solved = solver::solve(&mut board);
    debug_assert!(solved, "diagonally seeded boards always complete");
    board
}

/// Fills one 3x3 box with a random permutation of 1..=9.
fn fill_box<R: Rng>(board: &mut Board, start_row: usize, start_col: usize, rng: &mut R) {
    let mut digits: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    digits.shuffle(rng);

    for (i, &digit) in digits.iter().enumerate() {
        board.set(start_row + i / BOX_SIZE, start_col + i % BOX_SIZE, digit);
    }
}

/// Generates a puzzle and the solution it was punched from.
///
/// Cells are removed at uniformly random positions until the difficulty's
/// target count is reached; picking an already-empty cell is retried
/// without counting. The puzzle is not guaranteed to have a unique
/// solution.
pub fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> (Board, Board) {
    let solution = complete_board(rng);
    let mut puzzle = solution.clone();

    let mut removed = 0;
    while removed < difficulty.empty_cells() {
        let row = rng.gen_range(0..SIZE);
        let col = rng.gen_range(0..SIZE);
        if puzzle.value(row, col) != 0 {
            puzzle.set(row, col, 0);
            removed += 1;
        }
    }

    (puzzle, solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_complete_board_is_a_valid_solution() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = complete_board(&mut rng);
        assert_eq!(board.empty_count(), 0);
        assert!(solver::check_solution(&board));
    }

    #[test]
    fn test_generate_hits_exact_hole_counts() {
        let mut rng = StdRng::seed_from_u64(42);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let (puzzle, solution) = generate(difficulty, &mut rng);
            assert_eq!(puzzle.empty_count(), difficulty.empty_cells());
            assert!(solver::check_solution(&solution));
        }
    }

    #[test]
    fn test_solution_units_are_permutations() {
        let mut rng = StdRng::seed_from_u64(7);
        let (_, solution) = generate(Difficulty::Medium, &mut rng);

        let digits = |values: [u8; SIZE]| {
            let mut sorted = values;
            sorted.sort_unstable();
            sorted
        };
        let full: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

        for i in 0..SIZE {
            let row: [u8; SIZE] = std::array::from_fn(|c| solution.value(i, c));
            let col: [u8; SIZE] = std::array::from_fn(|r| solution.value(r, i));
            assert_eq!(digits(row), full, "row {i}");
            assert_eq!(digits(col), full, "column {i}");

            let (box_row, box_col) = (i / BOX_SIZE * BOX_SIZE, i % BOX_SIZE * BOX_SIZE);
            let boxed: [u8; SIZE] = std::array::from_fn(|j| {
                solution.value(box_row + j / BOX_SIZE, box_col + j % BOX_SIZE)
            });
            assert_eq!(digits(boxed), full, "box {i}");
        }
    }

    #[test]
    fn test_puzzle_cells_round_trip_through_validity() {
        let mut rng = StdRng::seed_from_u64(3);
        let (puzzle, solution) = generate(Difficulty::Hard, &mut rng);

        for row in 0..SIZE {
            for col in 0..SIZE {
                let mut probe = puzzle.clone();
                probe.set(row, col, 0);
                assert!(
                    solver::is_valid(&probe, row, col, solution.value(row, col)),
                    "solution value rejected at ({row}, {col})"
                );
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible_for_a_seed() {
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        assert_eq!(
            generate(Difficulty::Easy, &mut first),
            generate(Difficulty::Easy, &mut second)
        );
    }
}
