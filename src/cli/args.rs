//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Preflight - prerequisite verification for development toolchains.
#[derive(Debug, Parser)]
#[command(name = "preflight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides discovery of preflight.yml)
    #[arg(short, long, global = true, env = "PREFLIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output (each probe command as it runs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output (failing checks and the summary only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify required tools (default if no command specified)
    Check(CheckArgs),

    /// List configured checks without probing
    List(ListArgs),

    /// Write a starter preflight.yml
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Verify only the named checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Per-probe timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Bound on the whole run in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
