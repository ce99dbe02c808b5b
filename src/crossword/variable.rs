//! Slot variables: position, orientation, and required length

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a crossword slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

/// One crossword slot. Two variables denote the same slot iff their starting
/// cell, direction, and length all match; the derived ordering gives the
/// puzzle a canonical variable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    /// Create a new slot variable
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// Grid coordinates covered by this slot, in character-offset order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Variable {
            row,
            col,
            direction,
            length,
        } = *self;
        (0..length).map(move |k| match direction {
            Direction::Across => (row, col + k),
            Direction::Down => (row + k, col),
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} of length {}",
            self.row, self.col, self.direction, self.length
        )
    }
}
