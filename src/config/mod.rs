//! Configuration management for the maze encoder

pub mod settings;

pub use settings::{CliOverrides, EncodingConfig, InputConfig, OutputConfig, OutputFormat, Settings};
