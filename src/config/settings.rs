//! Configuration settings for the maze encoder

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub encoding: EncodingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Exact number of moves the path must take
    pub steps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub maze_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// How decoded paths are printed and saved
    pub format: OutputFormat,
    /// Write DIMACS here instead of standard output
    #[serde(default)]
    pub dimacs_file: Option<PathBuf>,
    /// Prefix the DIMACS output with `c` lines describing the variable layout
    #[serde(default)]
    pub comments: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            encoding: EncodingConfig { steps: 6 },
            input: InputConfig {
                maze_file: PathBuf::from("input/mazes/corridor.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                dimacs_file: None,
                comments: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !self.input.maze_file.exists() {
            anyhow::bail!("Maze file does not exist: {}", self.input.maze_file.display());
        }

        if let Some(ref file) = self.output.dimacs_file {
            if file.is_dir() {
                anyhow::bail!("DIMACS output path is a directory: {}", file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(steps) = cli_overrides.steps {
            self.encoding.steps = steps;
        }
        if let Some(ref maze_file) = cli_overrides.maze_file {
            self.input.maze_file = maze_file.clone();
        }
        if let Some(ref dimacs_file) = cli_overrides.dimacs_file {
            self.output.dimacs_file = Some(dimacs_file.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.comments {
            self.output.comments = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub steps: Option<usize>,
    pub maze_file: Option<PathBuf>,
    pub dimacs_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub comments: bool,
}
