//! Partial assignment of words to slot variables

use super::CspError;
use crate::crossword::{Crossword, Variable};
use std::collections::HashMap;

/// The search engine's working state: a mapping from variables to chosen
/// words, built up and torn down across the recursion. Mutation is guarded by
/// precondition checks so caller misuse cannot corrupt the search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<Variable, String>,
}

impl Assignment {
    /// Create an empty assignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `word` to `var`. Fails if `var` already has a value or the word
    /// length does not match the slot length.
    pub fn assign(&mut self, var: Variable, word: String) -> Result<(), CspError> {
        if self.values.contains_key(&var) {
            return Err(CspError::AlreadyAssigned(var));
        }
        if word.len() != var.length {
            return Err(CspError::LengthMismatch { var, word });
        }
        self.values.insert(var, word);
        Ok(())
    }

    /// Remove and return `var`'s value. Fails if `var` is unassigned.
    pub fn unassign(&mut self, var: &Variable) -> Result<String, CspError> {
        self.values.remove(var).ok_or(CspError::NotAssigned(*var))
    }

    /// The word assigned to `var`, if any
    pub fn get(&self, var: &Variable) -> Option<&String> {
        self.values.get(var)
    }

    /// Whether `var` has a value
    pub fn contains(&self, var: &Variable) -> bool {
        self.values.contains_key(var)
    }

    /// Number of assigned variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is assigned yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every variable of the puzzle has a value
    pub fn is_complete(&self, crossword: &Crossword) -> bool {
        crossword.variables().iter().all(|var| self.contains(var))
    }

    /// Iterate over `(variable, word)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &String)> + Clone {
        self.values.iter()
    }
}
