//! Puzzle geometry: the grid, its slot variables, and their overlaps

use super::{Direction, Variable};
use anyhow::Result;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// A crossword puzzle: grid structure, detected slot variables, the overlap
/// map between crossing slots, and the candidate vocabulary.
///
/// Variables, overlaps, and neighbor lists are computed once at construction
/// and never change. Variables are maximal horizontal or vertical runs of at
/// least two open cells; a single open cell belongs to no slot.
#[derive(Debug, Clone)]
pub struct Crossword {
    pub width: usize,
    pub height: usize,
    structure: Vec<bool>,
    variables: Vec<Variable>,
    overlaps: HashMap<(Variable, Variable), (usize, usize)>,
    neighbors: HashMap<Variable, Vec<Variable>>,
    words: HashSet<String>,
}

impl Crossword {
    /// Build a puzzle from a 2D open-cell mask and a vocabulary.
    pub fn new(cells: Vec<Vec<bool>>, words: HashSet<String>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Puzzle structure cannot be empty");
        }

        let height = cells.len();
        let width = cells[0].len();

        if width == 0 {
            anyhow::bail!("Puzzle width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        let structure: Vec<bool> = cells.into_iter().flatten().collect();
        let variables = detect_variables(&structure, width, height);
        let (overlaps, neighbors) = compute_overlaps(&variables);

        Ok(Self {
            width,
            height,
            structure,
            variables,
            overlaps,
            neighbors,
            words,
        })
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether the cell at the given coordinates is open (fillable)
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.structure[self.index(row, col)]
        } else {
            false
        }
    }

    /// All slot variables, in canonical order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The candidate vocabulary shared by every slot
    pub fn words(&self) -> &HashSet<String> {
        &self.words
    }

    /// Character offsets `(i, j)` at which `x` and `y` cross: offset `i` of
    /// `x`'s word must equal offset `j` of `y`'s word. `None` when the slots
    /// do not share a cell.
    pub fn overlap(&self, x: &Variable, y: &Variable) -> Option<(usize, usize)> {
        self.overlaps.get(&(*x, *y)).copied()
    }

    /// Variables sharing at least one cell with `var`, in canonical order
    pub fn neighbors(&self, var: &Variable) -> &[Variable] {
        self.neighbors.get(var).map_or(&[], Vec::as_slice)
    }

    /// Number of crossing pairs in the puzzle
    pub fn crossing_count(&self) -> usize {
        self.overlaps.len() / 2
    }
}

/// Scan the structure for maximal runs of open cells. Runs of length one are
/// skipped: they cannot hold a word.
fn detect_variables(structure: &[bool], width: usize, height: usize) -> Vec<Variable> {
    let open = |row: usize, col: usize| structure[row * width + col];
    let mut variables = Vec::new();

    for row in 0..height {
        let mut col = 0;
        while col < width {
            if open(row, col) {
                let mut length = 1;
                while col + length < width && open(row, col + length) {
                    length += 1;
                }
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, length));
                }
                col += length;
            } else {
                col += 1;
            }
        }
    }

    for col in 0..width {
        let mut row = 0;
        while row < height {
            if open(row, col) {
                let mut length = 1;
                while row + length < height && open(row + length, col) {
                    length += 1;
                }
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, length));
                }
                row += length;
            } else {
                row += 1;
            }
        }
    }

    variables.sort();
    variables
}

/// Intersect every pair of variables' cell lists. The overlap map holds both
/// orderings with the offsets swapped; the neighbor lists are kept sorted so
/// iteration order is deterministic.
#[allow(clippy::type_complexity)]
fn compute_overlaps(
    variables: &[Variable],
) -> (
    HashMap<(Variable, Variable), (usize, usize)>,
    HashMap<Variable, Vec<Variable>>,
) {
    let mut overlaps = HashMap::new();
    let mut neighbors: HashMap<Variable, Vec<Variable>> =
        variables.iter().map(|v| (*v, Vec::new())).collect();

    for (a, b) in variables.iter().tuple_combinations() {
        let offsets_a: HashMap<(usize, usize), usize> =
            a.cells().enumerate().map(|(i, cell)| (cell, i)).collect();

        let shared = b
            .cells()
            .enumerate()
            .find_map(|(j, cell)| offsets_a.get(&cell).map(|&i| (i, j)));

        if let Some((i, j)) = shared {
            overlaps.insert((*a, *b), (i, j));
            overlaps.insert((*b, *a), (j, i));
            if let Some(list) = neighbors.get_mut(a) {
                list.push(*b);
            }
            if let Some(list) = neighbors.get_mut(b) {
                list.push(*a);
            }
        }
    }

    for list in neighbors.values_mut() {
        list.sort();
    }

    (overlaps, neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// 3x3 grid with an open top row and an open middle column
    fn cross_structure() -> Vec<Vec<bool>> {
        vec![
            vec![true, true, true],
            vec![false, true, false],
            vec![false, true, false],
        ]
    }

    #[test]
    fn test_variable_detection() {
        let puzzle = Crossword::new(cross_structure(), vocab(&["CAT"])).unwrap();

        assert_eq!(
            puzzle.variables(),
            &[
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
            ]
        );
    }

    #[test]
    fn test_single_cells_are_not_slots() {
        // Lone open cells in every row and column
        let structure = vec![
            vec![true, false, true],
            vec![false, false, false],
            vec![true, false, true],
        ];
        let puzzle = Crossword::new(structure, vocab(&[])).unwrap();
        assert!(puzzle.variables().is_empty());
    }

    #[test]
    fn test_overlap_offsets() {
        let puzzle = Crossword::new(cross_structure(), vocab(&[])).unwrap();
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 1, Direction::Down, 3);

        // They share cell (0, 1): offset 1 of the across slot, offset 0 of
        // the down slot.
        assert_eq!(puzzle.overlap(&across, &down), Some((1, 0)));
        assert_eq!(puzzle.overlap(&down, &across), Some((0, 1)));
    }

    #[test]
    fn test_no_overlap_between_parallel_slots() {
        let structure = vec![
            vec![true, true, true],
            vec![false, false, false],
            vec![true, true, true],
        ];
        let puzzle = Crossword::new(structure, vocab(&[])).unwrap();
        let top = Variable::new(0, 0, Direction::Across, 3);
        let bottom = Variable::new(2, 0, Direction::Across, 3);

        assert_eq!(puzzle.overlap(&top, &bottom), None);
        assert!(puzzle.neighbors(&top).is_empty());
    }

    #[test]
    fn test_neighbors() {
        let puzzle = Crossword::new(cross_structure(), vocab(&[])).unwrap();
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 1, Direction::Down, 3);

        assert_eq!(puzzle.neighbors(&across), &[down]);
        assert_eq!(puzzle.neighbors(&down), &[across]);
        assert_eq!(puzzle.crossing_count(), 1);
    }

    #[test]
    fn test_ring_puzzle_geometry() {
        let structure = vec![
            vec![true, true, true, true, true],
            vec![true, false, false, false, true],
            vec![true, false, false, false, true],
            vec![true, false, false, false, true],
            vec![true, true, true, true, true],
        ];
        let puzzle = Crossword::new(structure, vocab(&[])).unwrap();

        assert_eq!(puzzle.variables().len(), 4);
        assert_eq!(puzzle.crossing_count(), 4);

        // Every slot crosses exactly two others
        for var in puzzle.variables() {
            assert_eq!(puzzle.neighbors(var).len(), 2);
        }
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let structure = vec![vec![true, true, true], vec![true, true]];
        assert!(Crossword::new(structure, vocab(&[])).is_err());
    }

    #[test]
    fn test_rejects_empty_structure() {
        assert!(Crossword::new(Vec::new(), vocab(&[])).is_err());
        assert!(Crossword::new(vec![Vec::new()], vocab(&[])).is_err());
    }
}
