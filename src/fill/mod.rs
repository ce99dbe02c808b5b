//! Fill problem definition and solution handling

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{FillProblem, PuzzleAnalysis, SolvabilityLikelihood};
pub use solution::{PlacedWord, Solution, SolutionMetadata};
pub use validator::{SolutionValidator, ValidationResult};
