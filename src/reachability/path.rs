//! Decoded path through a maze

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positions visited at each time step, starting state included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazePath {
    /// Side of the maze the path was decoded for
    pub size: usize,
    pub positions: Vec<(usize, usize)>,
}

impl MazePath {
    pub fn new(size: usize, positions: Vec<(usize, usize)>) -> Self {
        Self { size, positions }
    }

    /// Number of moves, one less than the number of positions
    pub fn steps(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<(usize, usize)> {
        self.positions.first().copied()
    }

    pub fn end(&self) -> Option<(usize, usize)> {
        self.positions.last().copied()
    }

    pub fn position_at(&self, step: usize) -> Option<(usize, usize)> {
        self.positions.get(step).copied()
    }

    /// Positions as a list of tuples, e.g. `[(0, 0), (0, 1)]`
    pub fn to_text(&self) -> String {
        format!(
            "[{}]",
            self.positions
                .iter()
                .map(|(row, col)| format!("({}, {})", row, col))
                .join(", ")
        )
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl fmt::Display for MazePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
