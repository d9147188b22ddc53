//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::report::Reporter;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `reporter` - Sink for progress and output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand means `check`.
    pub fn dispatch(&self, cli: &Cli, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(
                    &self.working_dir,
                    cli.config.clone(),
                    args.clone(),
                );
                cmd.execute(reporter)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(
                    &self.working_dir,
                    cli.config.clone(),
                    args.clone(),
                );
                cmd.execute(reporter)
            }
            Some(Commands::Init(args)) => {
                let cmd = super::init::InitCommand::new(&self.working_dir, args.clone());
                cmd.execute(reporter)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(reporter)
            }
            None => {
                let cmd = super::check::CheckCommand::new(
                    &self.working_dir,
                    cli.config.clone(),
                    crate::cli::args::CheckArgs::default(),
                );
                cmd.execute(reporter)
            }
        }
    }
}
