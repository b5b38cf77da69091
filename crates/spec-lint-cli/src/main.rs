//! spec-lint CLI tool.
//!
//! Usage:
//! ```bash
//! spec-lint check [OPTIONS] <DOCUMENT>
//! spec-lint contrast <FOREGROUND> <BACKGROUND>
//! spec-lint list-rules
//! spec-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Design canvas linter for accessibility and UX rules
#[derive(Parser)]
#[command(name = "spec-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a canvas snapshot
    Check {
        /// JSON snapshot of the canvas to scan
        document: PathBuf,

        /// JSON rule set to use instead of a preset
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Built-in rule set (recommended, basic)
        #[arg(short, long, conflicts_with = "rules")]
        preset: Option<String>,

        /// Only run specific rule ids (comma-separated)
        #[arg(long)]
        only: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Compute the WCAG contrast between two hex colors
    Contrast {
        /// Text color, e.g. "#333333"
        foreground: String,

        /// Background color, e.g. "#ffffff"
        background: String,

        /// Font size in pixels
        #[arg(long, default_value_t = 16.0)]
        font_size: f64,

        /// Font weight
        #[arg(long, default_value_t = 400.0)]
        font_weight: f64,
    },

    /// List available rule types and presets
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            document,
            rules,
            preset,
            only,
            format,
        } => {
            let source = config_resolver::resolve(&document, cli.config.as_deref());
            commands::check::run(
                &commands::check::CheckArgs {
                    document: &document,
                    rules: rules.as_deref(),
                    preset: preset.as_deref(),
                    only: only.as_deref(),
                },
                format,
                &source,
            )
        }
        Commands::Contrast {
            foreground,
            background,
            font_size,
            font_weight,
        } => commands::contrast::run(&foreground, &background, font_size, font_weight),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
