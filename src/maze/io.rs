//! File I/O for maze grids
//!
//! Format: the first line holds the side `n`, followed by `n` rows of at least
//! `n` characters each, `0` for a free cell and `1` for a blocked one.
//! Characters past column `n` are ignored.

use super::{Cell, Maze};
use crate::error::{EncodingError, EncodingResult};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a maze from a text file
pub fn load_maze_from_file<P: AsRef<Path>>(path: P) -> Result<Maze> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read maze file: {}", path.as_ref().display()))?;

    parse_maze_from_string(&content)
        .with_context(|| format!("Failed to parse maze from file: {}", path.as_ref().display()))
}

/// Parse a maze from its text representation
pub fn parse_maze_from_string(content: &str) -> EncodingResult<Maze> {
    let mut lines = content.lines();

    let header = lines
        .next()
        .map(str::trim)
        .ok_or_else(|| EncodingError::invalid_maze("maze file is empty"))?;
    let size: usize = header
        .parse()
        .map_err(|_| EncodingError::invalid_maze(format!("invalid maze size '{}'", header)))?;
    if size == 0 {
        return Err(EncodingError::DegenerateBitWidth { size });
    }

    let mut rows = Vec::with_capacity(size);
    for row_idx in 0..size {
        let line = lines.next().ok_or_else(|| {
            EncodingError::invalid_maze(format!("expected {} rows, found {}", size, row_idx))
        })?;

        let row = line
            .chars()
            .take(size)
            .enumerate()
            .map(|(col_idx, ch)| {
                Cell::from_char(ch).ok_or_else(|| {
                    EncodingError::invalid_maze(format!(
                        "invalid character '{}' at position ({}, {}); only '0' and '1' are allowed",
                        ch, row_idx, col_idx
                    ))
                })
            })
            .collect::<EncodingResult<Vec<_>>>()?;

        if row.len() < size {
            return Err(EncodingError::invalid_maze(format!(
                "row {} has {} cells, expected {}",
                row_idx,
                row.len(),
                size
            )));
        }
        rows.push(row);
    }

    if let Some(extra) = lines.position(|line| !line.trim().is_empty()) {
        return Err(EncodingError::invalid_maze(format!(
            "unexpected row {} after {} declared rows",
            size + extra,
            size
        )));
    }

    Maze::from_rows(rows)
}

/// Save a maze to a text file
pub fn save_maze_to_file<P: AsRef<Path>>(maze: &Maze, path: P) -> Result<()> {
    let content = maze_to_string(maze);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write maze to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a maze to its text representation
pub fn maze_to_string(maze: &Maze) -> String {
    let mut result = String::with_capacity((maze.size + 1) * (maze.size + 1) + 8);
    result.push_str(&maze.size.to_string());
    result.push('\n');

    for row in 0..maze.size {
        for col in 0..maze.size {
            let cell = maze.get(row, col).unwrap_or(Cell::Blocked);
            result.push(cell.to_char());
        }
        result.push('\n');
    }

    result
}

/// Create example maze files
pub fn create_example_mazes<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let open_content = "2\n00\n00\n";
    std::fs::write(dir.join("open.txt"), open_content).context("Failed to write open.txt")?;

    // Shortest route needs 6 moves
    let corridor_content = "4\n0000\n1110\n0000\n0110\n";
    std::fs::write(dir.join("corridor.txt"), corridor_content)
        .context("Failed to write corridor.txt")?;

    // Goal is walled off
    let sealed_content = "3\n000\n001\n010\n";
    std::fs::write(dir.join("sealed.txt"), sealed_content).context("Failed to write sealed.txt")?;

    let detour_content = "5\n00000\n11110\n00010\n01110\n00000\n";
    std::fs::write(dir.join("detour.txt"), detour_content).context("Failed to write detour.txt")?;

    Ok(())
}
