//! Main CLI application for the crossword filler

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossword_fill::{
    config::{CliOverrides, Settings},
    crossword::{create_example_puzzles, load_crossword_from_files},
    fill::{FillProblem, Solution, SolutionValidator},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crossword_fill")]
#[command(about = "Crossword CSP Filler")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a crossword puzzle from a vocabulary
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle structure file (overrides config)
        #[arg(short, long)]
        structure: Option<PathBuf>,

        /// Word list file (overrides config)
        #[arg(short, long)]
        words: Option<PathBuf>,

        /// Search time limit in seconds, 0 to disable (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List every placed word below the grid
        #[arg(long)]
        show_placements: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Re-check a saved solution against a puzzle and word list
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Solution JSON file produced by the solve command
        #[arg(long)]
        solution: PathBuf,

        /// Puzzle structure file (overrides config)
        #[arg(long)]
        structure: Option<PathBuf>,

        /// Word list file (overrides config)
        #[arg(long)]
        words: Option<PathBuf>,
    },

    /// Inspect a puzzle's slots and candidate counts without solving
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle structure file (overrides config)
        #[arg(short, long)]
        structure: Option<PathBuf>,

        /// Word list file (overrides config)
        #[arg(short, long)]
        words: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            structure,
            words,
            timeout,
            output,
            show_placements,
            verbose,
        } => solve_command(config, structure, words, timeout, output, show_placements, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate {
            config,
            solution,
            structure,
            words,
        } => validate_command(config, solution, structure, words),
        Commands::Analyze {
            config,
            structure,
            words,
        } => analyze_command(config, structure, words),
    }
}

/// Load settings from `config_path`, falling back to defaults, and apply the
/// common CLI overrides
fn load_settings(
    config_path: &PathBuf,
    structure: Option<PathBuf>,
    words: Option<PathBuf>,
    timeout: Option<u64>,
    output_dir: Option<PathBuf>,
) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    let cli_overrides = CliOverrides {
        structure_file: structure,
        vocabulary_file: words,
        timeout_seconds: timeout,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    Ok(settings)
}

fn solve_command(
    config_path: PathBuf,
    structure: Option<PathBuf>,
    words: Option<PathBuf>,
    timeout: Option<u64>,
    output_dir: Option<PathBuf>,
    show_placements: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting crossword filler"));

    let settings = load_settings(&config_path, structure, words, timeout, output_dir)?;

    if verbose {
        println!("Configuration:");
        println!("  Structure: {}", settings.puzzle.structure_file.display());
        println!("  Words: {}", settings.puzzle.vocabulary_file.display());
        println!("  Timeout: {}s", settings.solver.timeout_seconds);
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let mut problem = FillProblem::new(settings.clone()).context("Failed to create fill problem")?;

    if verbose {
        println!("{}", problem.analyze());
    }

    let Some(solution) = problem.solve().context("Failed to solve fill problem")? else {
        println!("{}", ColorOutput::warning("No solution."));
        return Ok(());
    };

    println!();
    println!("{}", SolutionFormatter::format_grid(&solution));
    if show_placements {
        for placement in &solution.placements {
            println!(
                "  ({}, {}) {}: {}",
                placement.row, placement.col, placement.direction, placement.word
            );
        }
    }

    if settings.output.save_solutions {
        let path = SolutionFormatter::save_solution(
            &solution,
            &settings.output.output_directory,
            &settings.output.format,
        )
        .context("Failed to save solution")?;
        println!(
            "{}",
            ColorOutput::success(&format!("Solution saved to {}", path.display()))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let input_dir = directory.join("input");
    create_example_puzzles(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    // A ready-made configuration for the larger example
    let mut ring_config = Settings::default();
    ring_config.puzzle.structure_file = PathBuf::from("input/puzzles/ring.txt");
    ring_config.to_file(&config_dir.join("ring.yaml"))?;
    println!("Created: {}", config_dir.join("ring.yaml").display());

    println!("{}", ColorOutput::success("Setup complete"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn validate_command(
    config_path: PathBuf,
    solution_path: PathBuf,
    structure: Option<PathBuf>,
    words: Option<PathBuf>,
) -> Result<()> {
    println!("{}", ColorOutput::info("Validating solution..."));

    let settings = load_settings(&config_path, structure, words, None, None)?;

    let crossword = load_crossword_from_files(
        &settings.puzzle.structure_file,
        &settings.puzzle.vocabulary_file,
    )
    .context("Failed to load puzzle")?;

    let solution = Solution::load_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    let assignment = solution
        .to_assignment()
        .context("Solution file is internally inconsistent")?;

    let result = SolutionValidator::new().validate(&crossword, &assignment);
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
    }

    Ok(())
}

fn analyze_command(
    config_path: PathBuf,
    structure: Option<PathBuf>,
    words: Option<PathBuf>,
) -> Result<()> {
    println!("{}", ColorOutput::info("Analyzing puzzle..."));

    let settings = load_settings(&config_path, structure, words, None, None)?;

    let problem = FillProblem::new(settings).context("Failed to load puzzle for analysis")?;
    println!("{}", problem.analyze());

    Ok(())
}
