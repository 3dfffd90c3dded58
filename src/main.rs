// SPDX-License-Identifier: PMPL-1.0-or-later
//! Designbot CLI - semantic accessibility analysis for design documents
//!
//! Part of the gitbot-fleet ecosystem.

use designbot::config::{load_config, Config};
use designbot::fleet::FindingSet;
use designbot::report::{generate_report, OutputFormat, ScanResult};
use designbot::scanner;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Semantic accessibility analysis for design documents
#[derive(Parser)]
#[command(name = "designbot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML or YAML)
    #[arg(long, global = true, default_value = "designbot.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single design document
    Analyze {
        /// Exported design document (JSON)
        file: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(long)]
        format: Option<FormatArg>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Analyze every design document under a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(long)]
        format: Option<FormatArg>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run as a fleet member (machine-readable output)
    Fleet {
        /// Directory to scan
        dir: PathBuf,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool, config: &Config) {
    let filter = if verbose {
        EnvFilter::new("designbot=debug")
    } else {
        EnvFilter::new(format!("designbot={}", config.log.level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Analyze { file, format, output } => {
            let format = resolve_format(format, &config)?;
            let scan = ScanResult::from(scanner::scan_file(&file, &config)?);
            let report = generate_report(&scan, format);
            write_output(&report, output.as_deref())?;

            if scan.has_failures() {
                std::process::exit(1);
            }
        }

        Commands::Check { dir, format, output } => {
            let format = resolve_format(format, &config)?;
            let scan = scanner::scan_directory(&dir, &config)?;
            let report = generate_report(&scan, format);
            write_output(&report, output.as_deref())?;

            if scan.has_failures() {
                std::process::exit(1);
            }
        }

        Commands::Fleet { dir } => {
            let scan = scanner::scan_directory(&dir, &config)?;
            let findings = FindingSet::from_scan(&scan);
            println!("{}", serde_json::to_string_pretty(&findings)?);

            if findings.blocks_release() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn resolve_format(arg: Option<FormatArg>, config: &Config) -> anyhow::Result<OutputFormat> {
    match arg {
        Some(arg) => Ok(arg.into()),
        None => Ok(config.report.output_format()?),
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
