//! Maze reachability as bounded model checking
//!
//! This library encodes "can the maze be crossed from `(0, 0)` to
//! `(n-1, n-1)` in exactly `k` moves" as a DIMACS CNF formula, and decodes a
//! solver's model back into the path it describes.

pub mod config;
pub mod error;
pub mod maze;
pub mod reachability;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::{EncodingError, EncodingResult};
pub use reachability::{MazePath, MazeProblem};

use anyhow::Result;

/// Main entry point: load the configured maze and build its formula
pub fn encode_maze(settings: Settings) -> Result<sat::CnfFormula> {
    let problem = MazeProblem::new(settings)?;
    problem.encode()
}
