//! Maze representation and adjacency

use crate::error::{EncodingError, EncodingResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Free,
    Blocked,
}

impl Cell {
    /// Parse the `0`/`1` character used by the maze text format
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Cell::Free),
            '1' => Some(Cell::Blocked),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Free => '0',
            Cell::Blocked => '1',
        }
    }

    pub fn is_free(self) -> bool {
        self == Cell::Free
    }
}

/// One of the four moves allowed inside the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed resolution order; clause order downstream depends on it
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Square maze of side `size`, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    pub size: usize,
    pub cells: Vec<Cell>,
}

impl Maze {
    /// Create a maze with every cell free
    pub fn open(size: usize) -> EncodingResult<Self> {
        if size == 0 {
            return Err(EncodingError::invalid_maze("maze side must be at least 1"));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Free; size * size],
        })
    }

    /// Create a maze from rows of cells, rejecting anything that is not square
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> EncodingResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(EncodingError::invalid_maze("maze has no rows"));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(EncodingError::invalid_maze(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Row-major index of a cell
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Number of cells in the maze
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Out-of-bounds positions are never free
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_free)
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> EncodingResult<()> {
        if row >= self.size || col >= self.size {
            return Err(EncodingError::invalid_maze(format!(
                "coordinates ({}, {}) out of bounds for {}x{} maze",
                row, col, self.size, self.size
            )));
        }
        let idx = self.index(row, col);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Free, in-bounds neighbours of `(row, col)` in up, down, left, right order.
    ///
    /// The state of `(row, col)` itself is not consulted.
    pub fn free_neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.step(row, col, *dir))
            .filter(|&(r, c)| self.is_free(r, c))
            .collect()
    }

    /// Position reached by moving once in `dir`, if it stays inside the maze
    pub fn step(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = dir.delta();
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.size && c < self.size).then_some((r, c))
    }

    /// Whether two positions are one orthogonal move apart
    pub fn are_adjacent(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        Direction::ALL
            .iter()
            .any(|dir| self.step(from.0, from.1, *dir) == Some(to))
    }

    /// All free cell coordinates in row-major order
    pub fn free_cells(&self) -> Vec<(usize, usize)> {
        let mut free = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_free(row, col) {
                    free.push((row, col));
                }
            }
        }
        free
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_free()).count()
    }

    pub fn start(&self) -> (usize, usize) {
        (0, 0)
    }

    pub fn goal(&self) -> (usize, usize) {
        (self.size - 1, self.size - 1)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = if self.is_free(row, col) { "⬜" } else { "⬛" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::Cell::{Blocked as B, Free as F};

    #[test]
    fn test_maze_creation() {
        let maze = Maze::open(3).unwrap();
        assert_eq!(maze.size, 3);
        assert_eq!(maze.cells.len(), 9);
        assert_eq!(maze.free_count(), 9);
        assert_eq!(maze.goal(), (2, 2));
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        let rows = vec![vec![F, F, F], vec![F, F, F]];
        assert!(matches!(Maze::from_rows(rows), Err(EncodingError::InvalidMaze { .. })));

        let rows = vec![vec![F, F], vec![F]];
        assert!(matches!(Maze::from_rows(rows), Err(EncodingError::InvalidMaze { .. })));

        assert!(Maze::from_rows(vec![]).is_err());
        assert!(Maze::open(0).is_err());
    }

    #[test]
    fn test_neighbor_order() {
        let maze = Maze::open(3).unwrap();
        assert_eq!(maze.free_neighbors(1, 1), vec![(0, 1), (2, 1), (1, 0), (1, 2)]);
        assert_eq!(maze.free_neighbors(0, 0), vec![(1, 0), (0, 1)]);
        assert_eq!(maze.free_neighbors(2, 2), vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_neighbors_skip_blocked() {
        let maze = Maze::from_rows(vec![
            vec![F, B, F],
            vec![F, F, B],
            vec![B, F, F],
        ])
        .unwrap();

        assert_eq!(maze.free_neighbors(1, 1), vec![(2, 1), (1, 0)]);
        assert_eq!(maze.free_neighbors(0, 2), Vec::<(usize, usize)>::new());
        assert_eq!(maze.free_count(), 6);
    }

    #[test]
    fn test_adjacency() {
        let maze = Maze::open(2).unwrap();
        assert!(maze.are_adjacent((0, 0), (0, 1)));
        assert!(maze.are_adjacent((1, 1), (0, 1)));
        assert!(!maze.are_adjacent((0, 0), (1, 1)));
        assert!(!maze.are_adjacent((0, 0), (0, 0)));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut maze = Maze::open(2).unwrap();
        assert!(maze.set(1, 1, B).is_ok());
        assert!(!maze.is_free(1, 1));
        assert!(maze.set(2, 0, B).is_err());
    }
}
