//! Check command implementation.
//!
//! The `preflight check` command verifies every required tool and
//! renders the report. It is also the default command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::CheckArgs;
use crate::config;
use crate::config::schema::DefaultsConfig;
use crate::error::{PreflightError, Result};
use crate::probe::SystemRunner;
use crate::report::{report_to_json, Reporter};
use crate::verify::engine::VerificationEngine;
use crate::verify::registry::CheckRegistry;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(working_dir: &Path, config_path: Option<PathBuf>, args: CheckArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path,
            args,
        }
    }

    /// Resolve the registry and timing defaults, falling back to the
    /// built-in checks when no config file exists.
    fn load_registry(&self) -> Result<(CheckRegistry, DefaultsConfig)> {
        match config::load(self.config_path.as_deref(), &self.working_dir)? {
            Some(loaded) => {
                let registry = CheckRegistry::from_config(&loaded.config)?;
                Ok((registry, loaded.config.defaults))
            }
            None => Ok((CheckRegistry::builtin(), DefaultsConfig::default())),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let (registry, defaults) = match self.load_registry() {
            Ok(loaded) => loaded,
            Err(PreflightError::ConfigNotFound { path }) => {
                reporter.error(&format!("Configuration not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let checks = registry.select(&self.args.only)?;

        let timeout = Duration::from_secs(self.args.timeout.unwrap_or(defaults.timeout_secs));
        let deadline = self
            .args
            .deadline
            .or(defaults.deadline_secs)
            .map(Duration::from_secs);

        let runner = SystemRunner;
        let mut engine = VerificationEngine::new(&runner).with_probe_timeout(timeout);
        if let Some(deadline) = deadline {
            engine = engine.with_deadline(deadline);
        }

        let report = engine.run(&checks, reporter)?;

        if self.args.json {
            let rendered = serde_json::to_string_pretty(&report_to_json(&report))
                .map_err(anyhow::Error::from)?;
            println!("{rendered}");
        }

        if report.passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}
