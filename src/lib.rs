//! Crossword CSP Filler
//!
//! This library fills crossword grids from a vocabulary of candidate words by
//! modelling the puzzle as a constraint satisfaction problem: arc consistency
//! propagation (AC-3) followed by heuristic-guided backtracking search.

pub mod config;
pub mod crossword;
pub mod csp;
pub mod fill;
pub mod utils;

pub use config::Settings;
pub use crossword::Crossword;
pub use fill::{FillProblem, Solution};

use anyhow::Result;

/// Main entry point for filling a crossword puzzle.
///
/// Returns `Ok(None)` when the puzzle has no solution under the configured
/// vocabulary.
pub fn fill_crossword(settings: Settings) -> Result<Option<Solution>> {
    let mut problem = FillProblem::new(settings)?;
    problem.solve()
}
