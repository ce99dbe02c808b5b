//! Independent validation of filled assignments
//!
//! The search engine already checks consistency as it goes; this validator
//! re-checks a finished assignment from scratch so that a solver defect can
//! never escape as a silently wrong solution.

use crate::crossword::Crossword;
use crate::crossword::Variable;
use crate::csp::Assignment;
use itertools::Itertools;
use std::fmt;

/// Validates assignments against the puzzle constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionValidator;

/// Result of validating an assignment
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<ConstraintViolation>,
    pub variables_checked: usize,
    pub pairs_checked: usize,
}

/// A single constraint violation found during validation
#[derive(Debug, Clone)]
pub struct ConstraintViolation {
    pub variable: Option<Variable>,
    pub description: String,
}

impl SolutionValidator {
    /// Create a new solution validator
    pub fn new() -> Self {
        Self
    }

    /// Check completeness, word lengths, vocabulary membership, global word
    /// distinctness, and every overlap constraint.
    pub fn validate(&self, crossword: &Crossword, assignment: &Assignment) -> ValidationResult {
        let mut violations = Vec::new();

        for var in crossword.variables() {
            match assignment.get(var) {
                None => violations.push(ConstraintViolation {
                    variable: Some(*var),
                    description: format!("slot {var} has no word assigned"),
                }),
                Some(word) => {
                    if word.len() != var.length {
                        violations.push(ConstraintViolation {
                            variable: Some(*var),
                            description: format!(
                                "word '{word}' has length {}, but {var} requires length {}",
                                word.len(),
                                var.length
                            ),
                        });
                    }
                    if !crossword.words().contains(word) {
                        violations.push(ConstraintViolation {
                            variable: Some(*var),
                            description: format!("word '{word}' is not in the vocabulary"),
                        });
                    }
                }
            }
        }

        for (var, _) in assignment.iter() {
            if !crossword.variables().contains(var) {
                violations.push(ConstraintViolation {
                    variable: Some(*var),
                    description: format!("assigned slot {var} is not part of the puzzle"),
                });
            }
        }

        let mut pairs_checked = 0;
        for (x, y) in crossword.variables().iter().tuple_combinations() {
            let (Some(wx), Some(wy)) = (assignment.get(x), assignment.get(y)) else {
                continue;
            };
            pairs_checked += 1;

            if wx == wy {
                violations.push(ConstraintViolation {
                    variable: Some(*x),
                    description: format!("word '{wx}' fills both {x} and {y}"),
                });
            }

            if let Some((i, j)) = crossword.overlap(x, y) {
                if wx.as_bytes().get(i) != wy.as_bytes().get(j) {
                    violations.push(ConstraintViolation {
                        variable: Some(*x),
                        description: format!(
                            "'{wx}' at {x} and '{wy}' at {y} disagree on their crossing letter"
                        ),
                    });
                }
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
            variables_checked: crossword.variables().len(),
            pairs_checked,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validation Result: {}",
            if self.is_valid { "VALID" } else { "INVALID" }
        )?;
        writeln!(f, "Slots checked: {}", self.variables_checked)?;
        writeln!(f, "Pairs checked: {}", self.pairs_checked)?;
        writeln!(f, "Violations: {}", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation.description)?;
        }
        Ok(())
    }
}
