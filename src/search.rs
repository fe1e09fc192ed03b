//! Step-observable maze search.
//!
//! DFS and BFS run as pull-based iterators: each [`Search::next`] call
//! either yields an event buffered by the current step or advances the
//! algorithm by exactly one pop/dequeue. Callers interleave their own
//! rendering or delays between pulls, and cancel by simply not pulling
//! again; the engine holds no external resources.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::maze::{CellState, Coord, Maze};

/// Neighbor exploration order: right, down, left, up.
const NEIGHBOR_ORDER: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Which traversal drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Depth-first: LIFO stack, no shortest-path guarantee.
    Dfs,
    /// Breadth-first: FIFO queue; visits cells in non-decreasing distance
    /// from start, so the returned path is shortest.
    Bfs,
}

/// A single observable step of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    /// `cell` changed to a new coloring `state`.
    State { cell: Coord, state: CellState },
    /// Terminal event; the iterator is exhausted afterwards.
    Finished(SearchResult),
}

/// Terminal outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// The route from the first cell after start to the goal, inclusive.
    /// Start itself is excluded.
    Path(Vec<Coord>),
    /// The frontier was exhausted without reaching the goal. Unreachable
    /// on a generated maze, but a normal outcome for hand-built grids.
    NotFound,
}

/// Starts a search over `maze` from `start` to `end`.
///
/// The returned iterator colors cell states on the maze as it emits the
/// matching events, so the maze's final coloring always agrees with the
/// event stream. Holding the maze mutably also means one maze has at most
/// one in-flight search.
///
/// Start and end cells are exempt from coloring but still take part in
/// visited-set membership and adjacency checks.
pub fn search(maze: &mut Maze, start: Coord, end: Coord, algorithm: Algorithm) -> Search<'_> {
    let mut worklist = VecDeque::new();
    worklist.push_back(start);

    let mut visited = FxHashSet::default();
    if algorithm == Algorithm::Bfs {
        // BFS membership is decided at enqueue time
        visited.insert(start);
    }

    Search {
        maze,
        goal: end,
        algorithm,
        worklist,
        visited,
        parents: FxHashMap::default(),
        pending: VecDeque::new(),
        done: false,
    }
}

/// An in-flight search; see [`search`].
pub struct Search<'m> {
    maze: &'m mut Maze,
    goal: Coord,
    algorithm: Algorithm,
    /// LIFO stack for DFS (back), FIFO queue for BFS (front to back).
    worklist: VecDeque<Coord>,
    visited: FxHashSet<Coord>,
    /// Links each discovered cell to the cell that discovered it; built
    /// fresh per search and discarded with it.
    parents: FxHashMap<Coord, Coord>,
    /// Events produced by the current step, drained one per pull.
    pending: VecDeque<StepEvent>,
    done: bool,
}

impl Iterator for Search<'_> {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                if matches!(event, StepEvent::Finished(_)) {
                    self.done = true;
                }
                return Some(event);
            }
            if self.done {
                return None;
            }
            match self.algorithm {
                Algorithm::Dfs => self.advance_dfs(),
                Algorithm::Bfs => self.advance_bfs(),
            }
        }
    }
}

impl Search<'_> {
    /// Drains the remaining events and returns the terminal result.
    pub fn run(self) -> SearchResult {
        for event in self {
            if let StepEvent::Finished(result) = event {
                return result;
            }
        }
        unreachable!("a search always ends with a terminal event")
    }

    /// One DFS step: pop, lazily discard duplicates, visit, expand.
    fn advance_dfs(&mut self) {
        let Some(current) = self.worklist.pop_back() else {
            self.pending
                .push_back(StepEvent::Finished(SearchResult::NotFound));
            return;
        };

        // duplicate stack entries are expected; dedup at pop time
        if !self.visited.insert(current) {
            return;
        }

        self.color(current, CellState::Visiting);
        if current == self.goal {
            self.finish_with_path();
            return;
        }
        self.color(current, CellState::Visited);

        for neighbor in self.open_unvisited_neighbors(current) {
            self.worklist.push_back(neighbor);
            // the parent link is fixed at first discovery and never
            // overwritten by a later push from another cell
            self.parents.entry(neighbor).or_insert(current);
        }
    }

    /// One BFS step: surface the frontier, dequeue, visit, expand.
    fn advance_bfs(&mut self) {
        // everything queued behind the head is observable as frontier
        // before the next dequeue
        for i in 1..self.worklist.len() {
            let queued = self.worklist[i];
            self.color(queued, CellState::Frontier);
        }

        let Some(current) = self.worklist.pop_front() else {
            self.pending
                .push_back(StepEvent::Finished(SearchResult::NotFound));
            return;
        };

        self.color(current, CellState::Visiting);
        if current == self.goal {
            self.finish_with_path();
            return;
        }
        self.color(current, CellState::Visited);

        for neighbor in self.open_unvisited_neighbors(current) {
            // mark visited at enqueue time so a cell is queued at most
            // once; its parent is exactly the cell that discovered it
            self.visited.insert(neighbor);
            self.worklist.push_back(neighbor);
            self.parents.insert(neighbor, current);
        }
    }

    /// In-bounds, non-wall, not-yet-visited neighbors in fixed order.
    fn open_unvisited_neighbors(&self, (x, y): Coord) -> Vec<Coord> {
        NEIGHBOR_ORDER
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .filter(|&cell| self.maze.is_open(cell) && !self.visited.contains(&cell))
            .collect()
    }

    /// Reconstructs the winning route and buffers its coloring plus the
    /// terminal event. Queue leftovers are demoted from frontier coloring
    /// first so the final picture shows only visited cells and the path.
    fn finish_with_path(&mut self) {
        let leftovers: Vec<Coord> = self.worklist.iter().copied().collect();
        for cell in leftovers {
            if self.maze.cell(cell).state == CellState::Frontier {
                self.color(cell, CellState::Visited);
            }
        }

        let path = reconstruct(&self.parents, self.goal);
        for &cell in &path {
            self.color(cell, CellState::Path);
        }
        self.pending
            .push_back(StepEvent::Finished(SearchResult::Path(path)));
    }

    /// Applies a coloring state to a cell and buffers the matching event.
    ///
    /// Start and end cells are exempt; re-applying a cell's current state
    /// is a no-op, so each transition is observed exactly once.
    fn color(&mut self, cell: Coord, state: CellState) {
        let target = self.maze.cell_mut(cell);
        if target.is_start || target.is_end || target.state == state {
            return;
        }
        target.state = state;
        self.pending.push_back(StepEvent::State { cell, state });
    }
}

/// Walks parent links from `goal` back to the start and reverses.
///
/// The start cell has no parent entry, so it terminates the walk and is
/// excluded; the result begins with the first step after start and ends
/// with `goal`.
fn reconstruct(parents: &FxHashMap<Coord, Coord>, goal: Coord) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(&parent) = parents.get(&current) {
        path.push(current);
        current = parent;
    }
    path.reverse();
    path
}
