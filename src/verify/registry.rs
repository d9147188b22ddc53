//! Built-in and configuration-derived check registries.

use std::collections::HashSet;

use regex::Regex;

use crate::config::schema::{CheckConfig, ComponentConfig, PreflightConfig};
use crate::error::{PreflightError, Result};
use crate::probe::Invocation;
use crate::verify::spec::{ComponentCheck, Detection, ToolCheck};
use crate::version::Version;

/// Ordered collection of the checks for one run.
///
/// Declaration order is preserved everywhere: checks run, render, and
/// serialize in the order they were registered.
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    checks: Vec<ToolCheck>,
}

impl CheckRegistry {
    /// The registry used when no configuration file exists: the
    /// Node.js, npm, and Poetry toolchain.
    pub fn builtin() -> Self {
        let poetry_plugins = [
            "poetry-plugin-export",
            "poetry-plugin-shell",
            "poetry-dotenv-plugin",
        ];
        let poetry_components = poetry_plugins
            .iter()
            .map(|plugin| ComponentCheck {
                name: plugin.to_string(),
                probe: Invocation::new("poetry", &["self", "show", "plugins"]),
                detect: Detection::Substring(plugin.to_string()),
                hint: Some(format!("poetry self add {plugin}")),
            })
            .collect();

        Self {
            checks: vec![
                ToolCheck {
                    name: "node".to_string(),
                    probe: Invocation::new("node", &["--version"]),
                    version_probe: None,
                    minimum: Version::new(20, 0, 0),
                    hint: Some("Install Node.js 20 or newer from https://nodejs.org/".to_string()),
                    components: Vec::new(),
                },
                ToolCheck {
                    name: "npm".to_string(),
                    probe: Invocation::new("npm", &["--version"]),
                    version_probe: None,
                    minimum: Version::new(10, 0, 0),
                    hint: Some(
                        "npm ships with Node.js; reinstall Node.js 20 or newer".to_string(),
                    ),
                    components: Vec::new(),
                },
                ToolCheck {
                    name: "poetry".to_string(),
                    probe: Invocation::new("poetry", &["--version"]),
                    version_probe: None,
                    minimum: Version::new(2, 0, 1),
                    hint: Some(
                        "Install Poetry 2.0.1 or newer: https://python-poetry.org/docs/#installation"
                            .to_string(),
                    ),
                    components: poetry_components,
                },
            ],
        }
    }

    /// Build a registry from parsed configuration.
    ///
    /// Every check is validated up front; a single bad entry fails the
    /// whole load so a typo cannot silently weaken the gate.
    pub fn from_config(config: &PreflightConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut checks = Vec::with_capacity(config.checks.len());
        for check_config in &config.checks {
            let check = check_from_config(check_config)?;
            if !seen.insert(check.name.clone()) {
                return Err(validation_error(format!(
                    "duplicate check name '{}'",
                    check.name
                )));
            }
            checks.push(check);
        }
        Ok(Self { checks })
    }

    pub fn checks(&self) -> &[ToolCheck] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ToolCheck> {
        self.checks.iter().find(|check| check.name == name)
    }

    /// Resolve a `--only` selection, keeping registry order regardless of
    /// how the names were given. An empty selection means every check.
    pub fn select(&self, names: &[String]) -> Result<Vec<ToolCheck>> {
        if names.is_empty() {
            return Ok(self.checks.clone());
        }
        for name in names {
            if self.get(name).is_none() {
                return Err(PreflightError::UnknownCheck { name: name.clone() });
            }
        }
        Ok(self
            .checks
            .iter()
            .filter(|check| names.contains(&check.name))
            .cloned()
            .collect())
    }
}

fn check_from_config(config: &CheckConfig) -> Result<ToolCheck> {
    let name = config.name.trim();
    if name.is_empty() {
        return Err(validation_error("check name must not be empty"));
    }

    let probe = Invocation::parse(&config.command).ok_or_else(|| {
        validation_error(format!("check '{name}': command must not be empty"))
    })?;

    let version_probe = match &config.version_command {
        Some(command) => Some(Invocation::parse(command).ok_or_else(|| {
            validation_error(format!(
                "check '{name}': version_command must not be empty"
            ))
        })?),
        None => None,
    };

    let minimum: Version = config.minimum.parse().map_err(|_| {
        validation_error(format!(
            "check '{name}': no version number found in minimum '{}'",
            config.minimum
        ))
    })?;

    let components = config
        .components
        .iter()
        .map(|component| component_from_config(name, component))
        .collect::<Result<Vec<_>>>()?;

    Ok(ToolCheck {
        name: name.to_string(),
        probe,
        version_probe,
        minimum,
        hint: config.hint.clone(),
        components,
    })
}

fn component_from_config(check_name: &str, config: &ComponentConfig) -> Result<ComponentCheck> {
    let name = config.name.trim();
    if name.is_empty() {
        return Err(validation_error(format!(
            "check '{check_name}': component name must not be empty"
        )));
    }

    let probe = Invocation::parse(&config.probe).ok_or_else(|| {
        validation_error(format!(
            "component '{name}': probe must not be empty"
        ))
    })?;

    let detect = match (&config.contains, &config.pattern) {
        (Some(_), Some(_)) => {
            return Err(validation_error(format!(
                "component '{name}': contains and pattern are mutually exclusive"
            )));
        }
        (Some(needle), None) => Detection::Substring(needle.clone()),
        (None, Some(pattern)) => Detection::Pattern(Regex::new(pattern).map_err(|e| {
            validation_error(format!("component '{name}': invalid pattern: {e}"))
        })?),
        // No detector given: the component's own name is the substring.
        (None, None) => Detection::Substring(name.to_string()),
    };

    Ok(ComponentCheck {
        name: name.to_string(),
        probe,
        detect,
        hint: config.hint.clone(),
    })
}

fn validation_error(message: impl Into<String>) -> PreflightError {
    PreflightError::ConfigValidationError {
        message: message.into(),
    }
}
