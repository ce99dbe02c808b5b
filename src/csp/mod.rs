//! Constraint-satisfaction core: domains, consistency enforcement, and search

pub mod assignment;
pub mod consistency;
pub mod domains;
pub mod search;

pub use assignment::Assignment;
pub use consistency::{ac3, enforce_node_consistency, revise};
pub use domains::DomainStore;
pub use search::{BacktrackSolver, SearchStatistics};

use crate::crossword::Variable;
use std::time::Duration;
use thiserror::Error;

/// Contract violations and aborts surfaced by the solver core. An
/// unsatisfiable puzzle is NOT an error: search reports it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CspError {
    #[error("variable {0} is already assigned")]
    AlreadyAssigned(Variable),

    #[error("variable {0} is not assigned")]
    NotAssigned(Variable),

    #[error("word '{word}' does not fit {var}")]
    LengthMismatch { var: Variable, word: String },

    #[error("search exceeded the time limit of {}s", .limit.as_secs())]
    Timeout { limit: Duration },
}
