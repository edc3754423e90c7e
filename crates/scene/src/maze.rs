//! Text maze layouts.
//!
//! One character per cell, one line per row:
//!
//! ```text
//! #  wall
//! .  floor
//! S  start (exactly one)
//! E  exit (optional)
//! ```
//!
//! Blank lines and trailing whitespace are ignored. Row `r`, column `c` maps
//! to the world-space cell center `(c * size, 0, r * size)`.

use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// Errors from parsing a maze layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("maze layout is empty")]
    EmptyLayout,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell `{ch}` at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
    #[error("maze has no start cell `S`")]
    MissingStart,
    #[error("maze has more than one {what} (second at row {row}, column {col})")]
    Duplicate {
        what: &'static str,
        row: usize,
        col: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Floor,
    Start,
    Exit,
}

impl Cell {
    pub fn is_walkable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Floor),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::Exit),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Floor => '.',
            Cell::Start => 'S',
            Cell::Exit => 'E',
        }
    }
}

/// Built-in maze used by the lit demo.
pub const DEFAULT_MAZE: &str = "\
#########
#...#...#
#.#.#.#.#
#.#...#.#
#.#####.#
#...#...#
###.#.#.#
#S....#E#
#########
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeLayout {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: (usize, usize),
    exit: Option<(usize, usize)>,
}

impl Default for MazeLayout {
    fn default() -> Self {
        match Self::parse(DEFAULT_MAZE) {
            Ok(layout) => layout,
            Err(e) => unreachable!("built-in maze is invalid: {e}"),
        }
    }
}

impl FromStr for MazeLayout {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl MazeLayout {
    pub fn parse(text: &str) -> Result<Self, SceneError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(SceneError::EmptyLayout);
        };
        let cols = first.chars().count();

        let mut cells = Vec::with_capacity(lines.len() * cols);
        let mut start = None;
        let mut exit = None;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(SceneError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(SceneError::UnknownCell { ch, row, col })?;
                let slot = match cell {
                    Cell::Start => Some((&mut start, "start")),
                    Cell::Exit => Some((&mut exit, "exit")),
                    Cell::Wall | Cell::Floor => None,
                };
                if let Some((slot, what)) = slot {
                    if slot.replace((row, col)).is_some() {
                        return Err(SceneError::Duplicate { what, row, col });
                    }
                }
                cells.push(cell);
            }
        }

        let start = start.ok_or(SceneError::MissingStart)?;
        Ok(Self {
            rows: lines.len(),
            cols,
            cells,
            start,
            exit,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn exit(&self) -> Option<(usize, usize)> {
        self.exit
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// All cells with their `(row, col)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| ((i / self.cols, i % self.cols), *cell))
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_walkable()).count()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.len() - self.wall_count()
    }

    pub fn cell_center(&self, row: usize, col: usize, cell_size: f32) -> Vec3 {
        Vec3::new(col as f32 * cell_size, 0.0, row as f32 * cell_size)
    }

    /// Yaw in degrees that faces an open neighbor of the start cell, trying
    /// north (-Z), east (+X), south (+Z), then west (-X).
    pub fn start_yaw(&self) -> f32 {
        let (row, col) = self.start;
        let neighbors = [
            (row.checked_sub(1).map(|r| (r, col)), -90.0),
            (Some((row, col + 1)), 0.0),
            (Some((row + 1, col)), 90.0),
            (col.checked_sub(1).map(|c| (row, c)), 180.0),
        ];
        neighbors
            .into_iter()
            .find_map(|(cell, yaw)| {
                let (r, c) = cell?;
                self.cell(r, c)
                    .filter(|cell| cell.is_walkable())
                    .map(|_| yaw)
            })
            .unwrap_or(-90.0)
    }
}

impl fmt::Display for MazeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maze_parses() {
        let maze = MazeLayout::default();
        assert_eq!(maze.rows(), 9);
        assert_eq!(maze.cols(), 9);
        assert_eq!(maze.start(), (7, 1));
        assert_eq!(maze.exit(), Some((7, 7)));
        assert_eq!(maze.wall_count() + maze.walkable_count(), 81);
        assert_eq!(maze.to_string(), DEFAULT_MAZE);
    }

    #[test]
    fn blank_lines_and_trailing_spaces_are_ignored() {
        let maze = MazeLayout::parse("\n###  \n#S#\n\n###\n").unwrap();
        assert_eq!((maze.rows(), maze.cols()), (3, 3));
        assert_eq!(maze.walkable_count(), 1);
    }

    #[test]
    fn empty_layout() {
        assert_eq!(MazeLayout::parse("  \n\n"), Err(SceneError::EmptyLayout));
    }

    #[test]
    fn ragged_row() {
        assert_eq!(
            MazeLayout::parse("###\n#S\n###"),
            Err(SceneError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn unknown_cell() {
        assert_eq!(
            MazeLayout::parse("###\n#S?\n###"),
            Err(SceneError::UnknownCell {
                ch: '?',
                row: 1,
                col: 2
            })
        );
    }

    #[test]
    fn missing_start() {
        assert_eq!(
            MazeLayout::parse("###\n#.#\n###"),
            Err(SceneError::MissingStart)
        );
    }

    #[test]
    fn duplicate_start_and_exit() {
        assert_eq!(
            MazeLayout::parse("####\n#SS#\n####"),
            Err(SceneError::Duplicate {
                what: "start",
                row: 1,
                col: 2
            })
        );
        assert!(matches!(
            MazeLayout::parse("#####\n#SEE#\n#####"),
            Err(SceneError::Duplicate { what: "exit", .. })
        ));
    }

    #[test]
    fn start_yaw_faces_open_neighbor() {
        // Only east is open.
        let east = MazeLayout::parse("####\n#S.#\n####").unwrap();
        assert_eq!(east.start_yaw(), 0.0);
        // Only south is open.
        let south = MazeLayout::parse("###\n#S#\n#.#\n###").unwrap();
        assert_eq!(south.start_yaw(), 90.0);
        // North wins when several are open.
        let north = MazeLayout::parse("###\n#.#\n#S.\n###").unwrap();
        assert_eq!(north.start_yaw(), -90.0);
        // Start on the top-left edge with no neighbors to the north/west.
        let edge = MazeLayout::parse("S#\n##").unwrap();
        assert_eq!(edge.start_yaw(), -90.0);
    }

    #[test]
    fn cell_lookup_and_centers() {
        let maze = MazeLayout::default();
        assert_eq!(maze.cell(0, 0), Some(Cell::Wall));
        assert_eq!(maze.cell(7, 1), Some(Cell::Start));
        assert_eq!(maze.cell(9, 0), None);
        assert_eq!(maze.cell_center(7, 1, 2.0), Vec3::new(2.0, 0.0, 14.0));
        assert_eq!(maze.cells().count(), 81);
    }
}
