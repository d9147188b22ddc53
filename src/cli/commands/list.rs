//! List command implementation.
//!
//! The `preflight list` command prints the effective check registry
//! without running any probes.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::ListArgs;
use crate::config;
use crate::error::{PreflightError, Result};
use crate::report::{Reporter, Theme};
use crate::verify::registry::CheckRegistry;
use crate::verify::spec::Detection;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(working_dir: &Path, config_path: Option<PathBuf>, args: ListArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path,
            args,
        }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve the registry and a human-readable description of where
    /// it came from.
    fn load_registry(&self) -> Result<(CheckRegistry, String)> {
        match config::load(self.config_path.as_deref(), &self.working_dir)? {
            Some(loaded) => {
                let registry = CheckRegistry::from_config(&loaded.config)?;
                Ok((registry, loaded.path.display().to_string()))
            }
            None => Ok((CheckRegistry::builtin(), "built-in defaults".to_string())),
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let (registry, source) = match self.load_registry() {
            Ok(loaded) => loaded,
            Err(PreflightError::ConfigNotFound { path }) => {
                reporter.error(&format!("Configuration not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let rendered = serde_json::to_string_pretty(&registry_to_json(&registry, &source))
                .map_err(anyhow::Error::from)?;
            println!("{rendered}");
            return Ok(CommandResult::success());
        }

        let theme = Theme::new();

        if registry.is_empty() {
            reporter.message("No checks configured.");
            return Ok(CommandResult::success());
        }

        reporter.message(&format!(
            "  {} {}",
            theme.highlight.apply_to("Checks"),
            theme.dim.apply_to(format!("({source})")),
        ));
        for check in registry.checks() {
            reporter.message(&format!(
                "    {} {} {}",
                theme.highlight.apply_to(&check.name),
                theme.command.apply_to(check.probe.to_string()),
                theme.dim.apply_to(format!("(minimum {})", check.minimum)),
            ));

            if let Some(ref version_probe) = check.version_probe {
                reporter.message(&format!(
                    "      {} {}",
                    theme.dim.apply_to("version via:"),
                    theme.command.apply_to(version_probe.to_string()),
                ));
            }

            if !check.components.is_empty() {
                let names: Vec<&str> =
                    check.components.iter().map(|c| c.name.as_str()).collect();
                reporter.message(&format!(
                    "      {} {}",
                    theme.dim.apply_to("└── requires:"),
                    theme.dim.apply_to(names.join(", ")),
                ));
            }
        }

        Ok(CommandResult::success())
    }
}

/// Machine-readable registry listing.
fn registry_to_json(registry: &CheckRegistry, source: &str) -> serde_json::Value {
    let checks: Vec<serde_json::Value> = registry
        .checks()
        .iter()
        .map(|check| {
            let components: Vec<serde_json::Value> = check
                .components
                .iter()
                .map(|component| {
                    let mut entry = json!({
                        "name": component.name,
                        "probe": component.probe.to_string(),
                        "hint": component.hint,
                    });
                    match &component.detect {
                        Detection::Substring(needle) => {
                            entry["contains"] = json!(needle);
                        }
                        Detection::Pattern(pattern) => {
                            entry["pattern"] = json!(pattern.as_str());
                        }
                    }
                    entry
                })
                .collect();

            json!({
                "name": check.name,
                "command": check.probe.to_string(),
                "version_command": check.version_probe.as_ref().map(|p| p.to_string()),
                "minimum": check.minimum.to_string(),
                "hint": check.hint,
                "components": components,
            })
        })
        .collect();

    json!({
        "source": source,
        "checks": checks,
    })
}
