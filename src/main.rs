//! ixcheck CLI - Inline XBRL filing validator

use anyhow::{Context as _, Result};
use clap::{Parser as ClapParser, Subcommand};
use colored::*;
use mimalloc::MiMalloc;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ixcheck::{render, EntitySize, Stats, ValidationResult};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Inline XBRL filing validator for UK statutory accounts
#[derive(ClapParser)]
#[command(name = "ixcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a filing and print document tallies
    Parse {
        /// Input file
        input: PathBuf,

        /// Show timing statistics
        #[arg(short, long)]
        stats: bool,
    },

    /// Validate one or more filings
    Validate {
        /// Input files
        inputs: Vec<PathBuf>,

        /// Entity size tier (micro, small, medium, large)
        #[arg(short = 's', long, default_value = "micro")]
        size: String,

        /// Output each result as JSON
        #[arg(long)]
        json: bool,

        /// Print the full human-readable report
        #[arg(short, long)]
        report: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { input, stats } => {
            let start = Instant::now();
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let doc = ixcheck::parse(&text)
                .with_context(|| format!("Failed to parse {}", input.display()))?;
            let tallies = Stats::collect(&doc, start.elapsed());

            println!("{} {}", "✓".green().bold(), input.display());
            println!("  Facts: {}", tallies.facts);
            println!("  Tagged elements: {}", tallies.tagged_elements);
            println!("  Contexts: {}", tallies.contexts);
            println!("  Units: {}", tallies.units);

            if stats {
                println!("  Time: {} ms", tallies.duration_ms);
            }
        }

        Commands::Validate {
            inputs,
            size,
            json,
            report,
        } => {
            anyhow::ensure!(!inputs.is_empty(), "no input files given");
            let size: EntitySize = size
                .parse()
                .with_context(|| "expected one of: micro, small, medium, large")?;

            let outcomes = validate_all(&inputs, size);

            let mut any_invalid = false;
            for (input, outcome) in inputs.iter().zip(outcomes) {
                let result = outcome
                    .with_context(|| format!("Failed to read {}", input.display()))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_summary(input, &result);
                }
                if report {
                    println!("{}", render(&result));
                }
                any_invalid |= !result.is_valid;
            }

            if any_invalid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn validate_all(
    inputs: &[PathBuf],
    size: EntitySize,
) -> Vec<ixcheck::Result<ValidationResult>> {
    #[cfg(feature = "parallel")]
    return inputs
        .par_iter()
        .map(|input| ixcheck::validate_file(input, size))
        .collect();

    #[cfg(not(feature = "parallel"))]
    inputs
        .iter()
        .map(|input| ixcheck::validate_file(input, size))
        .collect()
}

fn print_summary(input: &Path, result: &ValidationResult) {
    if result.is_valid {
        println!(
            "{} {} - Document is valid",
            "✓".green().bold(),
            input.display()
        );
        if !result.warnings.is_empty() {
            println!("  Warnings: {}", result.warnings.len());
        }
        return;
    }

    println!(
        "{} {} - Validation failed",
        "✗".red().bold(),
        input.display()
    );
    println!("  Errors: {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());
    println!("  Placeholders: {}", result.placeholders.len());

    for error in result.errors.iter().take(5) {
        println!("  {} {}", "ERROR:".red(), error);
    }
    if result.errors.len() > 5 {
        println!("  ... and {} more errors", result.errors.len() - 5);
    }

    for placeholder in result.placeholders.iter().take(5) {
        println!("  {} {}", "PLACEHOLDER:".yellow(), placeholder);
    }
}
