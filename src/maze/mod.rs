//! Maze grid and its text format

pub mod grid;
pub mod io;

pub use grid::{Cell, Direction, Maze};
pub use io::{create_example_mazes, load_maze_from_file, parse_maze_from_string, save_maze_to_file};
