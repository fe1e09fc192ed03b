//! Terminal rendering for mazes and search animation.
//!
//! Everything timing- and drawing-related lives here, in the binary; the
//! library only produces step events.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use puzzlebox::{search, Algorithm, CellState, Coord, Maze, SearchResult, StepEvent};

/// Glyph for one cell, given its flags and coloring.
fn glyph(is_wall: bool, is_start: bool, is_end: bool, state: CellState) -> char {
    if is_start {
        return 'S';
    }
    if is_end {
        return 'E';
    }
    if is_wall {
        return '#';
    }
    match state {
        CellState::Unvisited => '.',
        CellState::Frontier => ':',
        CellState::Visiting => '@',
        CellState::Visited => 'o',
        CellState::Path => '*',
    }
}

/// Renders the maze's current cells as one line per row.
pub fn draw(maze: &Maze) -> String {
    let size = maze.size();
    let mut out = String::with_capacity((size + 1) * size);
    for ((x, _), cell) in maze.iter() {
        out.push(glyph(cell.is_wall, cell.is_start, cell.is_end, cell.state));
        if x as usize == size - 1 {
            out.push('\n');
        }
    }
    out
}

/// A character canvas updated from step events, so frames can be drawn
/// while the search holds the maze mutably.
struct Canvas {
    size: usize,
    glyphs: Vec<char>,
}

impl Canvas {
    fn new(maze: &Maze) -> Self {
        let size = maze.size();
        let glyphs = maze
            .iter()
            .map(|(_, cell)| glyph(cell.is_wall, cell.is_start, cell.is_end, cell.state))
            .collect();
        Self { size, glyphs }
    }

    fn apply(&mut self, (x, y): Coord, state: CellState) {
        // events are never emitted for walls or endpoints
        self.glyphs[y as usize * self.size + x as usize] =
            glyph(false, false, false, state);
    }

    fn frame(&self) -> String {
        let mut out = String::with_capacity((self.size + 1) * self.size);
        for (i, &ch) in self.glyphs.iter().enumerate() {
            out.push(ch);
            if i % self.size == self.size - 1 {
                out.push('\n');
            }
        }
        out
    }
}

/// Runs a search over the maze, redrawing the frame after every event with
/// `delay` between steps. Returns the terminal result.
pub fn animate(maze: &mut Maze, algorithm: Algorithm, delay: Duration) -> SearchResult {
    let mut canvas = Canvas::new(maze);
    let size = maze.size();
    let (start, end) = (maze.start(), maze.end());

    print!("{}", canvas.frame());
    let _ = io::stdout().flush();

    let mut result = SearchResult::NotFound;
    for event in search(maze, start, end, algorithm) {
        match event {
            StepEvent::State { cell, state } => {
                canvas.apply(cell, state);
                // move the cursor back up and repaint in place
                print!("\x1b[{size}A{}", canvas.frame());
                let _ = io::stdout().flush();
                thread::sleep(delay);
            }
            StepEvent::Finished(terminal) => result = terminal,
        }
    }
    result
}
