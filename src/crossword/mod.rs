//! Crossword puzzle model: slots, geometry, and input files

pub mod io;
pub mod puzzle;
pub mod variable;

pub use io::{load_crossword_from_files, load_words_from_file, create_example_puzzles};
pub use puzzle::Crossword;
pub use variable::{Direction, Variable};
