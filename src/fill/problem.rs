//! Crossword fill problem definition

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::crossword::{load_crossword_from_files, Crossword, Direction, Variable};
use crate::csp::{ac3, enforce_node_consistency, BacktrackSolver, DomainStore};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Represents one crossword fill problem
pub struct FillProblem {
    settings: Settings,
    crossword: Crossword,
    validator: SolutionValidator,
}

impl FillProblem {
    /// Create a new fill problem from settings
    pub fn new(settings: Settings) -> Result<Self> {
        let crossword = load_crossword_from_files(
            &settings.puzzle.structure_file,
            &settings.puzzle.vocabulary_file,
        )
        .context("Failed to load puzzle")?;

        Ok(Self {
            settings,
            crossword,
            validator: SolutionValidator::new(),
        })
    }

    /// Create a problem with an explicit puzzle (useful for testing)
    pub fn with_crossword(settings: Settings, crossword: Crossword) -> Self {
        Self {
            settings,
            crossword,
            validator: SolutionValidator::new(),
        }
    }

    /// Solve the fill problem. `Ok(None)` means the puzzle has no solution
    /// under the configured vocabulary.
    pub fn solve(&mut self) -> Result<Option<Solution>> {
        let start_time = Instant::now();

        println!(
            "Filling {}x{} puzzle: {} slot(s), {} crossing(s), {} candidate word(s)",
            self.crossword.width,
            self.crossword.height,
            self.crossword.variables().len(),
            self.crossword.crossing_count(),
            self.crossword.words().len()
        );

        let mut domains = DomainStore::seed(&self.crossword);
        enforce_node_consistency(&mut domains, &self.crossword);
        println!(
            "Node consistency removed {} candidate(s)",
            domains.removal_count()
        );

        if !ac3(&mut domains, &self.crossword, None) {
            println!("Arc consistency emptied a domain; no solution exists");
            return Ok(None);
        }
        println!(
            "Arc consistency reached a fixed point ({} candidate(s) pruned in total)",
            domains.removal_count()
        );

        let timeout = self.settings.solver.timeout_seconds;
        let mut solver = if timeout > 0 {
            BacktrackSolver::with_time_limit(&self.crossword, Duration::from_secs(timeout))
        } else {
            BacktrackSolver::new(&self.crossword)
        };

        let result = solver
            .solve(&mut domains)
            .context("Backtracking search aborted")?;
        let statistics = solver.statistics();
        let solve_time = start_time.elapsed();

        let Some(assignment) = result else {
            println!(
                "Search exhausted {} state(s) without a solution in {:.3}s",
                statistics.states,
                solve_time.as_secs_f64()
            );
            return Ok(None);
        };

        println!(
            "Search found a solution in {:.3}s ({} state(s), {} backtrack(s))",
            solve_time.as_secs_f64(),
            statistics.states,
            statistics.backtracks
        );

        let report = self.validator.validate(&self.crossword, &assignment);
        if !report.is_valid {
            anyhow::bail!("Search returned an invalid assignment:\n{report}");
        }

        Ok(Some(Solution::new(
            &self.crossword,
            &assignment,
            solve_time,
            statistics,
        )))
    }

    /// Get the puzzle
    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Inspect the puzzle without solving it
    pub fn analyze(&self) -> PuzzleAnalysis {
        let mut domains = DomainStore::seed(&self.crossword);
        enforce_node_consistency(&mut domains, &self.crossword);

        let variables = self.crossword.variables();
        let across_count = variables
            .iter()
            .filter(|v| v.direction == Direction::Across)
            .count();

        let sizes: Vec<usize> = variables.iter().map(|v| domains.size(v)).collect();
        let smallest_domain = sizes.iter().copied().min().unwrap_or(0);
        let average_domain = if sizes.is_empty() {
            0.0
        } else {
            sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
        };

        let empty_slots: Vec<Variable> = variables
            .iter()
            .filter(|v| domains.is_empty(v))
            .copied()
            .collect();

        let max_degree = variables
            .iter()
            .map(|v| self.crossword.neighbors(v).len())
            .max()
            .unwrap_or(0);

        let likelihood = if !empty_slots.is_empty() {
            SolvabilityLikelihood::Low
        } else if smallest_domain <= 2 {
            SolvabilityLikelihood::Medium
        } else {
            SolvabilityLikelihood::High
        };

        let mut recommendations = Vec::new();
        for var in &empty_slots {
            recommendations.push(format!(
                "No vocabulary word of length {} fits the slot at ({}, {}); extend the word list",
                var.length, var.row, var.col
            ));
        }
        if empty_slots.is_empty() && smallest_domain <= 2 {
            recommendations.push(
                "Some slots have very few candidates; a larger vocabulary would help".to_string(),
            );
        }
        if recommendations.is_empty() {
            recommendations.push("Puzzle looks reasonable to fill".to_string());
        }

        PuzzleAnalysis {
            width: self.crossword.width,
            height: self.crossword.height,
            variable_count: variables.len(),
            across_count,
            down_count: variables.len() - across_count,
            crossing_count: self.crossword.crossing_count(),
            vocabulary_size: self.crossword.words().len(),
            max_degree,
            smallest_domain,
            average_domain,
            empty_slots,
            likelihood,
            recommendations,
        }
    }
}

/// Pre-search statistics about a puzzle
#[derive(Debug, Clone)]
pub struct PuzzleAnalysis {
    pub width: usize,
    pub height: usize,
    pub variable_count: usize,
    pub across_count: usize,
    pub down_count: usize,
    pub crossing_count: usize,
    pub vocabulary_size: usize,
    pub max_degree: usize,
    pub smallest_domain: usize,
    pub average_domain: f64,
    pub empty_slots: Vec<Variable>,
    pub likelihood: SolvabilityLikelihood,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvabilityLikelihood {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for PuzzleAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Puzzle Analysis:")?;
        writeln!(f, "  Grid: {}x{}", self.width, self.height)?;
        writeln!(
            f,
            "  Slots: {} ({} across, {} down)",
            self.variable_count, self.across_count, self.down_count
        )?;
        writeln!(f, "  Crossings: {}", self.crossing_count)?;
        writeln!(f, "  Vocabulary: {} word(s)", self.vocabulary_size)?;
        writeln!(f, "  Max degree: {}", self.max_degree)?;
        writeln!(
            f,
            "  Candidates per slot after length filtering: min {}, avg {:.1}",
            self.smallest_domain, self.average_domain
        )?;
        writeln!(f, "  Likelihood: {:?}", self.likelihood)?;
        writeln!(f, "  Recommendations:")?;
        for rec in &self.recommendations {
            writeln!(f, "    - {}", rec)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_settings() -> Settings {
        // Default paths are never touched: tests construct puzzles in memory
        Settings::default()
    }

    fn cross_puzzle(words: &[&str]) -> Crossword {
        let structure = vec![
            vec![true, true, true],
            vec![false, true, false],
            vec![false, true, false],
        ];
        let vocab: HashSet<String> = words.iter().map(|w| w.to_string()).collect();
        Crossword::new(structure, vocab).unwrap()
    }

    #[test]
    fn test_solve_crossing_pair() {
        let puzzle = cross_puzzle(&["CAT", "CAR", "ART"]);
        let mut problem = FillProblem::with_crossword(test_settings(), puzzle);

        let solution = problem.solve().unwrap().unwrap();

        assert_eq!(solution.metadata.word_count, 2);
        assert_eq!(solution.rows.len(), 3);
        // The down slot is forced to ART; its last letter lands in row 2
        assert_eq!(solution.rows[2], "#T#");
    }

    #[test]
    fn test_unsatisfiable_by_length() {
        let structure = vec![vec![true; 5]];
        let words: HashSet<String> = ["CAT", "ARTS"].iter().map(|w| w.to_string()).collect();
        let puzzle = Crossword::new(structure, words).unwrap();
        let mut problem = FillProblem::with_crossword(test_settings(), puzzle);

        assert!(problem.solve().unwrap().is_none());
    }

    #[test]
    fn test_unsatisfiable_by_crossing() {
        let puzzle = cross_puzzle(&["CAT", "CAR", "RAT"]);
        let mut problem = FillProblem::with_crossword(test_settings(), puzzle);

        assert!(problem.solve().unwrap().is_none());
    }

    #[test]
    fn test_disabled_timeout() {
        let mut settings = test_settings();
        settings.solver.timeout_seconds = 0;
        let puzzle = cross_puzzle(&["CAT", "CAR", "ART"]);
        let mut problem = FillProblem::with_crossword(settings, puzzle);

        assert!(problem.solve().unwrap().is_some());
    }

    #[test]
    fn test_analysis_flags_empty_slot() {
        let structure = vec![vec![true; 5]];
        let words: HashSet<String> = ["CAT"].iter().map(|w| w.to_string()).collect();
        let puzzle = Crossword::new(structure, words).unwrap();
        let problem = FillProblem::with_crossword(test_settings(), puzzle);

        let analysis = problem.analyze();

        assert_eq!(analysis.likelihood, SolvabilityLikelihood::Low);
        assert_eq!(analysis.empty_slots.len(), 1);
        assert!(analysis.recommendations[0].contains("length 5"));
    }

    #[test]
    fn test_analysis_counts() {
        let puzzle = cross_puzzle(&["CAT", "CAR", "ART", "RAT"]);
        let problem = FillProblem::with_crossword(test_settings(), puzzle);

        let analysis = problem.analyze();

        assert_eq!(analysis.variable_count, 2);
        assert_eq!(analysis.across_count, 1);
        assert_eq!(analysis.down_count, 1);
        assert_eq!(analysis.crossing_count, 1);
        assert_eq!(analysis.smallest_domain, 4);
        assert_eq!(analysis.likelihood, SolvabilityLikelihood::High);
    }
}
