//! Configuration settings for the crossword filler

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub puzzle: PuzzleConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Text file describing the grid: '_' for open cells, '#' for blocked ones.
    pub structure_file: PathBuf,
    /// Word list with one candidate word per line.
    pub vocabulary_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock limit for the backtracking search. Zero disables the limit.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solutions: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig {
                structure_file: PathBuf::from("input/puzzles/cross.txt"),
                vocabulary_file: PathBuf::from("input/words/common.txt"),
            },
            solver: SolverConfig {
                timeout_seconds: 300,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solutions: true,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !self.puzzle.structure_file.exists() {
            anyhow::bail!(
                "Structure file does not exist: {}",
                self.puzzle.structure_file.display()
            );
        }

        if !self.puzzle.vocabulary_file.exists() {
            anyhow::bail!(
                "Vocabulary file does not exist: {}",
                self.puzzle.vocabulary_file.display()
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref structure_file) = cli_overrides.structure_file {
            self.puzzle.structure_file = structure_file.clone();
        }
        if let Some(ref vocabulary_file) = cli_overrides.vocabulary_file {
            self.puzzle.vocabulary_file = vocabulary_file.clone();
        }
        if let Some(timeout_seconds) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = timeout_seconds;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub structure_file: Option<PathBuf>,
    pub vocabulary_file: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
    pub output_dir: Option<PathBuf>,
}
