//! Per-variable candidate domains with an undo trail
//!
//! Every removal is logged to a trail so that a search branch can capture a
//! checkpoint before running inference and restore the exact pre-branch state
//! when the branch fails. Sibling branches therefore never observe each
//! other's prunings.

use crate::crossword::{Crossword, Variable};
use std::collections::{HashMap, HashSet};

/// Mapping from each slot variable to the words still considered legal for it
#[derive(Debug, Clone)]
pub struct DomainStore {
    domains: HashMap<Variable, HashSet<String>>,
    trail: Vec<(Variable, String)>,
}

/// Opaque trail position returned by [`DomainStore::checkpoint`]
pub type Checkpoint = usize;

impl DomainStore {
    /// Seed every variable's domain with the full vocabulary. Length
    /// filtering is a separate step (node consistency enforcement).
    pub fn seed(crossword: &Crossword) -> Self {
        let domains = crossword
            .variables()
            .iter()
            .map(|var| (*var, crossword.words().clone()))
            .collect();

        Self {
            domains,
            trail: Vec::new(),
        }
    }

    /// Number of candidate words remaining for `var`
    pub fn size(&self, var: &Variable) -> usize {
        self.domains.get(var).map_or(0, HashSet::len)
    }

    /// Whether `var` has no candidates left
    pub fn is_empty(&self, var: &Variable) -> bool {
        self.size(var) == 0
    }

    /// Whether `word` is still a candidate for `var`
    pub fn contains(&self, var: &Variable, word: &str) -> bool {
        self.domains.get(var).is_some_and(|d| d.contains(word))
    }

    /// The candidate words remaining for `var`
    pub fn words(&self, var: &Variable) -> impl Iterator<Item = &String> {
        self.domains.get(var).into_iter().flatten()
    }

    /// Remove `word` from `var`'s domain, logging the removal on the trail.
    /// Returns whether the word was present.
    pub fn remove(&mut self, var: &Variable, word: &str) -> bool {
        if let Some(domain) = self.domains.get_mut(var) {
            if domain.remove(word) {
                self.trail.push((*var, word.to_string()));
                return true;
            }
        }
        false
    }

    /// Current trail position; pass to [`rollback`](Self::rollback) to undo
    /// everything removed after this point.
    pub fn checkpoint(&self) -> Checkpoint {
        self.trail.len()
    }

    /// Reinsert, in reverse order, every removal logged after `mark`
    pub fn rollback(&mut self, mark: Checkpoint) {
        for (var, word) in self.trail.split_off(mark).into_iter().rev() {
            if let Some(domain) = self.domains.get_mut(&var) {
                domain.insert(word);
            }
        }
    }

    /// Total number of removals logged since the store was seeded
    pub fn removal_count(&self) -> usize {
        self.trail.len()
    }
}
