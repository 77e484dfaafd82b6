//! # tilia-cli
//!
//! Command-line interface for converting Tilia `.tlx` exports.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tilia_report::{BatchSummary, ConvertConfig, Converter, Mode};
use tracing_subscriber::EnvFilter;

/// tilia - Convert Tilia TLX exports to CSV and text reports
#[derive(Parser)]
#[command(name = "tilia")]
#[command(author, version, about = "Convert Tilia TLX exports to CSV and text reports", long_about = None)]
struct Cli {
    /// Folder scanned for *.tlx files
    #[arg(value_name = "INPUT", default_value = "./input")]
    input: PathBuf,

    /// Folder receiving the converted output
    #[arg(value_name = "OUTPUT", default_value = "./output")]
    output: PathBuf,

    /// Output mode (overrides the config file)
    #[arg(short = 'm', long = "mode")]
    mode: Option<ModeArg>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output mode.
#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    /// One CSV of the dense grid per document
    Crunch,
    /// One folder per document with the grid and its metadata
    Report,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Crunch => Mode::Crunch,
            ModeArg::Report => Mode::Report,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; warnings are always shown.
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let summary = run(&cli)?;
    print_summary(&summary);

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Build the configuration from the config file and command-line overrides.
fn load_config(cli: &Cli) -> Result<ConvertConfig> {
    let mut config = match &cli.config {
        Some(path) => ConvertConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ConvertConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    Ok(config)
}

/// Convert every document of the input folder.
fn run(cli: &Cli) -> Result<BatchSummary> {
    let converter = Converter::new(load_config(cli)?);
    converter
        .convert_dir(&cli.input, &cli.output)
        .with_context(|| {
            format!(
                "Failed to convert {} into {}",
                cli.input.display(),
                cli.output.display()
            )
        })
}

fn print_summary(summary: &BatchSummary) {
    for written in &summary.converted {
        println!("{} {}", "Wrote".green().bold(), written.display());
    }
    for failure in &summary.failed {
        eprintln!(
            "{} {}: {}",
            "Failed".red().bold(),
            failure.source.display(),
            failure.error
        );
    }
    println!(
        "{} converted, {} failed",
        summary.converted.len(),
        summary.failed.len()
    );
}
