//! Configuration management for the crossword filler

pub mod settings;

pub use settings::{
    Settings, PuzzleConfig, SolverConfig, OutputConfig, OutputFormat, CliOverrides,
};
