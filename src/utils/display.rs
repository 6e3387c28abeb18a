//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::maze::Maze;
use crate::reachability::MazePath;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Format decoded paths for display
pub struct PathFormatter;

impl PathFormatter {
    /// Format a path in the requested output format
    pub fn format(path: &MazePath, format: OutputFormat, maze: Option<&Maze>) -> Result<String> {
        Ok(match format {
            OutputFormat::Text => path.to_text(),
            OutputFormat::Json => path.to_json().context("Failed to serialize path")?,
            OutputFormat::Visual => Self::format_visual(path, maze),
        })
    }

    /// Draw the grid with the step at which each cell is first visited.
    ///
    /// Without a maze every cell is drawn as free.
    pub fn format_visual(path: &MazePath, maze: Option<&Maze>) -> String {
        let mut first_visit = HashMap::new();
        for (step, &position) in path.positions.iter().enumerate() {
            first_visit.entry(position).or_insert(step);
        }

        let width = path.steps().to_string().len().max(2);
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..path.size {
            output.push_str(&format!(" {:>width$}", col % 100, width = width));
        }
        output.push('\n');

        for row in 0..path.size {
            output.push_str(&format!("{:2} ", row));
            for col in 0..path.size {
                let cell = match first_visit.get(&(row, col)) {
                    Some(step) => step.to_string(),
                    None if maze.is_some_and(|m| !m.is_free(row, col)) => "█".repeat(width),
                    None => "·".to_string(),
                };
                output.push_str(&format!(" {:>width$}", cell, width = width));
            }
            output.push('\n');
        }

        output
    }

    /// Save a path to `file` in the requested format
    pub fn save_path<P: AsRef<Path>>(
        path: &MazePath,
        file: P,
        format: OutputFormat,
        maze: Option<&Maze>,
    ) -> Result<()> {
        let file = file.as_ref();
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut content = Self::format(path, format, maze)?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        std::fs::write(file, content)
            .with_context(|| format!("Failed to write path to {}", file.display()))?;
        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
