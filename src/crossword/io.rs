//! File I/O for puzzle structures and word lists

use super::Crossword;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load a puzzle structure from a text file.
/// Format: one line per row, '_' for open cells and '#' for blocked cells.
pub fn load_structure_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<bool>>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read structure file: {}", path.as_ref().display()))?;

    parse_structure_from_string(&content)
        .with_context(|| format!("Failed to parse structure file: {}", path.as_ref().display()))
}

/// Parse a puzzle structure from a string representation
pub fn parse_structure_from_string(content: &str) -> Result<Vec<Vec<bool>>> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Structure is empty or contains no valid rows");
    }

    let width = lines[0].chars().count();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.chars().count() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.chars().count(),
                width
            );
        }

        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '_' => row.push(true),
                '#' => row.push(false),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '_' and '#' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        cells.push(row);
    }

    Ok(cells)
}

/// Load a vocabulary from a word-list file, one word per line
pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read word list: {}", path.as_ref().display()))?;

    parse_word_list(&content)
        .with_context(|| format!("Failed to parse word list: {}", path.as_ref().display()))
}

/// Parse a vocabulary from a string: one word per line, blank lines skipped,
/// normalized to uppercase. Words must be ASCII so that character offsets in
/// overlap constraints coincide with byte offsets.
pub fn parse_word_list(content: &str) -> Result<HashSet<String>> {
    let mut words = HashSet::new();

    for (line_idx, line) in content.lines().enumerate() {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if !word.is_ascii() {
            anyhow::bail!(
                "Word '{}' on line {} contains non-ASCII characters",
                word,
                line_idx + 1
            );
        }
        words.insert(word.to_ascii_uppercase());
    }

    Ok(words)
}

/// Load a complete puzzle: structure plus vocabulary
pub fn load_crossword_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
    structure_path: P,
    vocabulary_path: Q,
) -> Result<Crossword> {
    let cells = load_structure_from_file(structure_path)?;
    let words = load_words_from_file(vocabulary_path)?;
    Crossword::new(cells, words)
}

/// Create example puzzle and word-list files for testing
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    let puzzle_dir = dir.join("puzzles");
    let word_dir = dir.join("words");

    for sub in [&puzzle_dir, &word_dir] {
        std::fs::create_dir_all(sub)
            .with_context(|| format!("Failed to create directory: {}", sub.display()))?;
    }

    // A top row crossed by a middle column
    let cross_content = "___\n#_#\n#_#\n";
    std::fs::write(puzzle_dir.join("cross.txt"), cross_content)
        .context("Failed to write cross.txt")?;

    // Four five-letter slots around the rim of the grid
    let ring_content = "_____\n_###_\n_###_\n_###_\n_____\n";
    std::fs::write(puzzle_dir.join("ring.txt"), ring_content)
        .context("Failed to write ring.txt")?;

    let common_words = "\
cat\ncar\nart\nrat\ntar\nsun\nbus\nsplit\nsiren\nthose\nniche\nstone\nnurse\ntreat\neaten\n";
    std::fs::write(word_dir.join("common.txt"), common_words)
        .context("Failed to write common.txt")?;

    Ok(())
}
