//! Solution representation for filled crossword puzzles

use crate::crossword::{Crossword, Direction, Variable};
use crate::csp::{Assignment, CspError, SearchStatistics};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// One word placed into a slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedWord {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
    pub word: String,
}

impl PlacedWord {
    /// The slot this placement fills
    pub fn variable(&self) -> Variable {
        Variable::new(self.row, self.col, self.direction, self.length)
    }
}

/// A complete, validated fill of a crossword puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Placed words in canonical slot order
    pub placements: Vec<PlacedWord>,
    /// Rendered grid rows: letters for filled cells, '_' for open cells
    /// outside every slot, '#' for blocked cells
    pub rows: Vec<String>,
    pub width: usize,
    pub height: usize,
    /// Time taken to find this solution
    #[serde(skip)]
    pub solve_time: Duration,
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Identifier derived from the placements
    pub id: String,
    /// Number of placed words
    pub word_count: usize,
    /// Number of cells covered by at least one word
    pub filled_cells: usize,
    /// Tentative assignments explored by the search
    pub states_explored: usize,
    /// Assignments undone after their branch failed
    pub backtracks: usize,
}

impl Solution {
    /// Build a solution record from a complete assignment
    pub fn new(
        crossword: &Crossword,
        assignment: &Assignment,
        solve_time: Duration,
        statistics: SearchStatistics,
    ) -> Self {
        let placements: Vec<PlacedWord> = crossword
            .variables()
            .iter()
            .filter_map(|var| {
                assignment.get(var).map(|word| PlacedWord {
                    row: var.row,
                    col: var.col,
                    direction: var.direction,
                    length: var.length,
                    word: word.clone(),
                })
            })
            .collect();

        let mut letters: HashMap<(usize, usize), char> = HashMap::new();
        for placement in &placements {
            for (cell, letter) in placement.variable().cells().zip(placement.word.chars()) {
                letters.insert(cell, letter);
            }
        }

        let rows: Vec<String> = (0..crossword.height)
            .map(|row| {
                (0..crossword.width)
                    .map(|col| {
                        if !crossword.is_open(row, col) {
                            '#'
                        } else {
                            letters.get(&(row, col)).copied().unwrap_or('_')
                        }
                    })
                    .collect()
            })
            .collect();

        let filled_cells = letters.len();
        let metadata = SolutionMetadata {
            id: generate_id(&placements),
            word_count: placements.len(),
            filled_cells,
            states_explored: statistics.states,
            backtracks: statistics.backtracks,
        };

        Self {
            placements,
            rows,
            width: crossword.width,
            height: crossword.height,
            solve_time,
            metadata,
        }
    }

    /// Reconstruct the variable-to-word assignment from the placements
    pub fn to_assignment(&self) -> Result<Assignment, CspError> {
        let mut assignment = Assignment::new();
        for placement in &self.placements {
            assignment.assign(placement.variable(), placement.word.clone())?;
        }
        Ok(assignment)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// Derive a stable identifier from the placements
fn generate_id(placements: &[PlacedWord]) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    placements.hash(&mut hasher);
    format!("fill_{:x}", hasher.finish())
}
