//! Init command implementation.
//!
//! The `preflight init` command writes a starter configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::CONFIG_FILE_NAMES;
use crate::error::Result;
use crate::report::{Reporter, Theme};

use super::dispatcher::{Command, CommandResult};

/// Starter configuration mirroring the built-in checks, with the knobs
/// spelled out so users can edit instead of reading docs.
const STARTER_CONFIG: &str = r#"# Prerequisite checks for this project.
#
# Each check probes a binary, extracts a version number from its output,
# and compares it against `minimum`. Quote numeric-looking minimums like
# "20" so YAML keeps them as strings. Omit `version_command` when the
# probe command already prints the version.
#
# Require a plugin or sub-component:
#   components:
#     - name: poetry-plugin-export
#       probe: poetry self show plugins
#       hint: poetry self add poetry-plugin-export

defaults:
  timeout_secs: 30
  # deadline_secs: 120

checks:
  - name: node
    command: node --version
    minimum: "20"
    hint: "Install Node.js 20 or newer from https://nodejs.org/"

  - name: npm
    command: npm --version
    minimum: "10"
    hint: "npm ships with Node.js; reinstall Node.js 20 or newer"

  - name: poetry
    command: poetry --version
    minimum: 2.0.1
    hint: "Install Poetry 2.0.1 or newer: https://python-poetry.org/docs/#installation"
    components:
      - name: poetry-plugin-export
        probe: poetry self show plugins
        hint: poetry self add poetry-plugin-export
      - name: poetry-plugin-shell
        probe: poetry self show plugins
        hint: poetry self add poetry-plugin-shell
      - name: poetry-dotenv-plugin
        probe: poetry self show plugins
        hint: poetry self add poetry-dotenv-plugin
"#;

/// The init command implementation.
pub struct InitCommand {
    working_dir: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(working_dir: &Path, args: InitArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            args,
        }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Find an existing config file under either recognized name.
    fn existing_config(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.working_dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

impl Command for InitCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        if let Some(existing) = self.existing_config() {
            if !self.args.force {
                reporter.error(&format!(
                    "{} already exists. Use --force to overwrite.",
                    existing.display()
                ));
                return Ok(CommandResult::failure(2));
            }
        }

        let target = self.working_dir.join(CONFIG_FILE_NAMES[0]);
        fs::write(&target, STARTER_CONFIG)?;

        let theme = Theme::new();
        reporter.message(&theme.format_success(&format!("Created {}", target.display())));
        reporter.message("\nNext steps:");
        reporter.message("  1. Review preflight.yml and adjust the minimum versions");
        reporter.message("  2. Run `preflight` to verify your tools");

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::report::RecordingReporter;
    use crate::verify::registry::CheckRegistry;
    use crate::version::Version;
    use tempfile::TempDir;

    #[test]
    fn init_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());

        assert_eq!(cmd.working_dir(), temp.path());
        assert!(cmd.existing_config().is_none());
    }

    #[test]
    fn starter_config_parses_and_builds_registry() {
        let config = parse_config(STARTER_CONFIG, Path::new("preflight.yml")).unwrap();
        assert_eq!(config.defaults.timeout_secs, 30);
        assert_eq!(config.defaults.deadline_secs, None);

        let registry = CheckRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 3);

        let node = registry.get("node").unwrap();
        assert_eq!(node.minimum, Version::new(20, 0, 0));

        let poetry = registry.get("poetry").unwrap();
        assert_eq!(poetry.minimum, Version::new(2, 0, 1));
        assert_eq!(poetry.components.len(), 3);
        assert_eq!(
            poetry.components[0].hint.as_deref(),
            Some("poetry self add poetry-plugin-export")
        );
    }

    #[test]
    fn init_writes_starter_config() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let mut reporter = RecordingReporter::new();

        let result = cmd.execute(&mut reporter).unwrap();

        assert!(result.success);
        let written = fs::read_to_string(temp.path().join("preflight.yml")).unwrap();
        assert!(written.contains("name: node"));
        assert!(reporter.has_message("Created"));
        assert!(reporter.has_message("Next steps:"));
    }

    #[test]
    fn init_fails_if_config_exists() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("preflight.yml"), "checks: []").unwrap();

        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let mut reporter = RecordingReporter::new();

        let result = cmd.execute(&mut reporter).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert!(reporter.has_error("--force"));
    }

    #[test]
    fn init_refuses_when_yaml_variant_exists() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("preflight.yaml"), "checks: []").unwrap();

        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let mut reporter = RecordingReporter::new();

        let result = cmd.execute(&mut reporter).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn init_with_force_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("preflight.yml"), "checks: []").unwrap();

        let args = InitArgs { force: true };
        let cmd = InitCommand::new(temp.path(), args);
        let mut reporter = RecordingReporter::new();

        let result = cmd.execute(&mut reporter).unwrap();

        assert!(result.success);
        let written = fs::read_to_string(temp.path().join("preflight.yml")).unwrap();
        assert!(written.contains("name: node"));
    }
}
