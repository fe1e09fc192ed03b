//! Maze representation and generation.
//!
//! A maze is a square grid of wall/open cells. Generation carves a perfect
//! maze: the open cells form a spanning tree under 4-neighbor adjacency,
//! so exactly one simple path connects any two of them.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Grid;

/// An `(x, y)` cell coordinate.
pub type Coord = (i32, i32);

/// Step-2 carving directions: right, down, left, up.
const CARVE_DIRECTIONS: [(i32, i32); 4] = [(2, 0), (0, 2), (-2, 0), (0, -2)];

/// Search-time coloring of a cell.
///
/// A closed enumeration rather than a free-form label; non-endpoint cells
/// move `Unvisited -> (Frontier) -> Visiting -> Visited`, with `Path`
/// applied retroactively along the winning route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Unvisited,
    /// Queued by BFS but not yet dequeued.
    Frontier,
    /// The cell currently being processed.
    Visiting,
    Visited,
    /// On the route from start to end.
    Path,
}

/// A single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeCell {
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub state: CellState,
}

impl MazeCell {
    const WALL: Self = Self {
        is_wall: true,
        is_start: false,
        is_end: false,
        state: CellState::Unvisited,
    };

    const OPEN: Self = Self {
        is_wall: false,
        is_start: false,
        is_end: false,
        state: CellState::Unvisited,
    };
}

/// A maze grid with exactly one start and one end cell.
#[derive(Debug, Clone)]
pub struct Maze {
    cells: Grid<MazeCell>,
    start: Coord,
    end: Coord,
}

impl Maze {
    /// Carves a random perfect maze of `size` x `size` cells.
    ///
    /// Every cell starts as a wall; a randomized depth-first carve from
    /// (1, 1) opens every odd-coordinate cell plus the walls between them.
    /// Start is (1, 1) and end is (size-2, size-2); both have odd
    /// coordinates, so the carve's full coverage guarantees they are open.
    ///
    /// # Panics
    ///
    /// Panics if `size` is even or smaller than 5.
    pub fn generate<R: Rng>(size: usize, rng: &mut R) -> Self {
        assert!(size >= 5, "maze size must be at least 5, got {size}");
        assert!(size % 2 == 1, "maze size must be odd, got {size}");

        let mut cells = Grid::new(size, size, MazeCell::WALL);
        carve(&mut cells, rng);

        let end = (size as i32 - 2, size as i32 - 2);
        let start_cell = cells.get_mut(1, 1);
        start_cell.is_wall = false;
        start_cell.is_start = true;
        let end_cell = cells.get_mut(end.0 as usize, end.1 as usize);
        end_cell.is_wall = false;
        end_cell.is_end = true;

        Self {
            cells,
            start: (1, 1),
            end,
        }
    }

    /// Creates a fully open `size` x `size` maze for hand-built layouts.
    ///
    /// Start defaults to the top-left corner and end to the bottom-right;
    /// place walls with [`Maze::set_wall`] and move the endpoints with
    /// [`Maze::set_start`] / [`Maze::set_end`]. No size or connectivity
    /// constraints apply to hand-built mazes.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2` (start and end must be distinct cells).
    pub fn open(size: usize) -> Self {
        assert!(size >= 2, "maze size must be at least 2, got {size}");

        let mut cells = Grid::new(size, size, MazeCell::OPEN);
        cells.get_mut(0, 0).is_start = true;
        cells.get_mut(size - 1, size - 1).is_end = true;

        Self {
            cells,
            start: (0, 0),
            end: (size as i32 - 1, size as i32 - 1),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.width()
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn cell(&self, (x, y): Coord) -> &MazeCell {
        assert!(self.cells.in_bounds(x, y), "cell ({x}, {y}) out of bounds");
        self.cells.get(x as usize, y as usize)
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, (x, y): Coord) -> &mut MazeCell {
        assert!(self.cells.in_bounds(x, y), "cell ({x}, {y}) out of bounds");
        self.cells.get_mut(x as usize, y as usize)
    }

    /// Whether the coordinate is in bounds and not a wall.
    #[inline]
    pub fn is_open(&self, (x, y): Coord) -> bool {
        self.cells.in_bounds(x, y) && !self.cells.get(x as usize, y as usize).is_wall
    }

    /// Turns a cell into a wall.
    pub fn set_wall(&mut self, x: usize, y: usize) {
        let cell = self.cells.get_mut(x, y);
        assert!(
            !cell.is_start && !cell.is_end,
            "cannot wall the start or end cell"
        );
        cell.is_wall = true;
    }

    /// Moves the start marker, opening the target cell.
    pub fn set_start(&mut self, x: usize, y: usize) {
        let (sx, sy) = self.start;
        self.cells.get_mut(sx as usize, sy as usize).is_start = false;

        let cell = self.cells.get_mut(x, y);
        assert!(!cell.is_end, "start and end must be distinct cells");
        cell.is_wall = false;
        cell.is_start = true;
        self.start = (x as i32, y as i32);
    }

    /// Moves the end marker, opening the target cell.
    pub fn set_end(&mut self, x: usize, y: usize) {
        let (ex, ey) = self.end;
        self.cells.get_mut(ex as usize, ey as usize).is_end = false;

        let cell = self.cells.get_mut(x, y);
        assert!(!cell.is_start, "start and end must be distinct cells");
        cell.is_wall = false;
        cell.is_end = true;
        self.end = (x as i32, y as i32);
    }

    /// Resets every cell's search coloring so the maze can be searched again.
    pub fn clear_search_state(&mut self) {
        for y in 0..self.cells.height() {
            for x in 0..self.cells.width() {
                self.cells.get_mut(x, y).state = CellState::Unvisited;
            }
        }
    }

    /// Iterates over all cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &MazeCell)> {
        self.cells
            .iter()
            .map(|((x, y), cell)| ((x as i32, y as i32), cell))
    }
}

/// One suspended carve step: a cell and its remaining shuffled directions.
struct Frame {
    at: Coord,
    directions: [(i32, i32); 4],
    next: usize,
}

fn frame<R: Rng>(at: Coord, rng: &mut R) -> Frame {
    let mut directions = CARVE_DIRECTIONS;
    directions.shuffle(rng);
    Frame {
        at,
        directions,
        next: 0,
    }
}

/// Randomized depth-first carve over the odd-coordinate cells.
///
/// Each visited cell draws its own shuffled direction order; for every
/// step-2 target still walled, the midpoint wall and the target are opened
/// and the carve descends into the target. The frame stack replaces
/// recursion, whose depth would otherwise reach the odd-cell count.
fn carve<R: Rng>(cells: &mut Grid<MazeCell>, rng: &mut R) {
    cells.get_mut(1, 1).is_wall = false;
    let mut stack = vec![frame((1, 1), rng)];

    while let Some(top) = stack.last_mut() {
        if top.next == top.directions.len() {
            stack.pop();
            continue;
        }

        let (x, y) = top.at;
        let (dx, dy) = top.directions[top.next];
        top.next += 1;

        let (nx, ny) = (x + dx, y + dy);
        if !cells.in_bounds(nx, ny) || !cells.get(nx as usize, ny as usize).is_wall {
            continue;
        }

        // open the wall midpoint, then the target, then descend
        cells
            .get_mut((x + dx / 2) as usize, (y + dy / 2) as usize)
            .is_wall = false;
        cells.get_mut(nx as usize, ny as usize).is_wall = false;
        stack.push(frame((nx, ny), rng));
    }
}
