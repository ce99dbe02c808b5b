//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::fill::Solution;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, show_placements: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!(
            "Solve Time: {:.3}s\n",
            solution.solve_time.as_secs_f64()
        ));
        output.push_str(&format!("Words Placed: {}\n", solution.metadata.word_count));
        output.push_str(&format!(
            "Search: {} state(s), {} backtrack(s)\n",
            solution.metadata.states_explored, solution.metadata.backtracks
        ));
        output.push('\n');
        output.push_str(&Self::format_grid(solution));

        if show_placements {
            output.push_str("\nPlacements:\n");
            for placement in &solution.placements {
                output.push_str(&format!(
                    "  ({}, {}) {}: {}\n",
                    placement.row, placement.col, placement.direction, placement.word
                ));
            }
        }

        output
    }

    /// Render the filled grid: letters for filled cells, '█' for blocked
    /// cells, ' ' for open cells outside every slot
    pub fn format_grid(solution: &Solution) -> String {
        let mut output = String::new();
        for row in &solution.rows {
            for ch in row.chars() {
                output.push(match ch {
                    '#' => '█',
                    '_' => ' ',
                    letter => letter,
                });
            }
            output.push('\n');
        }
        output
    }

    /// Render the filled grid with row and column coordinates
    pub fn format_grid_with_coords(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..solution.width {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for (row_idx, row) in solution.rows.iter().enumerate() {
            output.push_str(&format!("{:2} ", row_idx));
            for ch in row.chars() {
                let rendered = match ch {
                    '#' => '█',
                    '_' => ' ',
                    letter => letter,
                };
                output.push(' ');
                output.push(rendered);
            }
            output.push('\n');
        }

        output
    }

    /// Save a solution to the output directory in the configured format,
    /// returning the written path
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("solution_{}.txt", solution.metadata.id));
                std::fs::write(&path, Self::format_solution(solution, true))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("solution_{}.json", solution.metadata.id));
                solution.save_to_file(&path)?;
                path
            }
        };

        Ok(path)
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

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
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
