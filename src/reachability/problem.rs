//! Maze reachability problem: settings in, DIMACS out, and back again

use super::{AssignmentDecoder, MazePath, PathValidator, ValidationResult};
use crate::config::Settings;
use crate::error::EncodingError;
use crate::maze::{load_maze_from_file, Maze};
use crate::sat::dimacs::{write_dimacs, SolverModel, SolverStatus};
use crate::sat::{BmcEncoder, CnfFormula, EncodingStatistics};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use tracing::{info, warn};

/// A maze together with the settings used to encode it
pub struct MazeProblem {
    settings: Settings,
    maze: Maze,
}

impl MazeProblem {
    /// Create a problem by loading the maze named in the settings
    pub fn new(settings: Settings) -> Result<Self> {
        let maze = load_maze_from_file(&settings.input.maze_file).context("Failed to load maze file")?;
        Ok(Self { settings, maze })
    }

    /// Create a problem with an explicit maze
    pub fn with_maze(settings: Settings, maze: Maze) -> Self {
        Self { settings, maze }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn steps(&self) -> usize {
        self.settings.encoding.steps
    }

    pub fn encoder(&self) -> Result<BmcEncoder<'_>> {
        BmcEncoder::new(&self.maze, self.steps()).context("Failed to prepare maze encoding")
    }

    /// Build the reachability formula
    pub fn encode(&self) -> Result<CnfFormula> {
        self.encoder()?.encode().context("Failed to encode maze")
    }

    pub fn encoding_statistics(&self) -> Result<EncodingStatistics> {
        Ok(self.encoder()?.statistics())
    }

    /// Encode and write DIMACS to `writer`
    pub fn write_dimacs<W: Write>(&self, writer: W) -> Result<EncodingStatistics> {
        let encoder = self.encoder()?;
        let formula = encoder.encode().context("Failed to encode maze")?;
        let comments = if self.settings.output.comments {
            encoder.layout_description()
        } else {
            Vec::new()
        };

        write_dimacs(writer, &formula, &comments).context("Failed to write DIMACS output")?;
        Ok(encoder.statistics())
    }

    /// Encode and write DIMACS to the configured file, or standard output
    pub fn write_output(&self) -> Result<EncodingStatistics> {
        match self.settings.output.dimacs_file {
            Some(ref path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
                }
                let file = File::create(path)
                    .with_context(|| format!("Failed to create DIMACS file: {}", path.display()))?;
                let stats = self.write_dimacs(file)?;
                info!(file = %path.display(), "wrote DIMACS formula");
                Ok(stats)
            }
            None => self.write_dimacs(std::io::stdout().lock()),
        }
    }

    /// Decode a solver model for this problem and check the resulting path
    pub fn decode(&self, model: &SolverModel) -> Result<(MazePath, ValidationResult)> {
        let declared = self.encoder()?.statistics().total_variables;
        if model.status != Some(SolverStatus::Unsatisfiable) && model.values.len() < declared {
            return Err(EncodingError::malformed_assignment(format!(
                "model assigns {} variables, the formula declares {}",
                model.values.len(),
                declared
            )))
            .context("Failed to decode solver model");
        }

        let path = decode_solver_model(model, self.maze.size, Some(self.steps()))?;
        let validation = PathValidator::new(&self.maze).validate(&path);
        if !validation.is_valid {
            warn!(violations = validation.violations.len(), "decoded path breaks maze rules");
        }
        Ok((path, validation))
    }
}

/// Decode a solver model for a maze of side `size`.
///
/// With `steps` the position prefix of the model is decoded and auxiliary
/// variables are ignored; without it the whole model is taken as positions.
pub fn decode_solver_model(model: &SolverModel, size: usize, steps: Option<usize>) -> Result<MazePath> {
    if model.status == Some(SolverStatus::Unsatisfiable) {
        anyhow::bail!("Solver reported UNSATISFIABLE; there is no path of the encoded length");
    }

    let decoder = AssignmentDecoder::new(size).context("Invalid maze dimension")?;
    let path = match steps {
        Some(steps) => decoder.decode_model(&model.values, steps),
        None => {
            warn!("no step count given; treating every model variable as a position bit");
            decoder.decode_path(&model.values)
        }
    }
    .context("Failed to decode solver model")?;

    info!(positions = path.positions.len(), "decoded path");
    Ok(path)
}
