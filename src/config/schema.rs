//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! preflight.yml file format.

use serde::{Deserialize, Serialize};

/// Per-probe allowance applied when the file names none.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root configuration structure for preflight.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflightConfig {
    /// Timing defaults applied to the whole run
    pub defaults: DefaultsConfig,

    /// Tool checks, verified in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckConfig>,
}

/// Timing defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Per-probe allowance in seconds
    pub timeout_secs: u64,

    /// Bound on the whole run in seconds; absent means unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_secs: Option<u64>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            deadline_secs: None,
        }
    }
}

/// Configuration for a single tool check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Display name, unique across checks; also the `--only` selector
    pub name: String,

    /// Probe command. The first word is the binary looked up on PATH,
    /// the rest are arguments. Split on whitespace; shell quoting is
    /// not interpreted.
    pub command: String,

    /// Separate command for version text, for tools whose presence
    /// probe prints none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_command: Option<String>,

    /// Minimum acceptable version. Parsed tolerantly, so "20" means
    /// 20.0.0. Quote values that look like numbers so YAML keeps them
    /// as text.
    pub minimum: String,

    /// Remediation shown when the check fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Required sub-components, such as plugins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentConfig>,
}

/// A required sub-component of a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Name reported when the component is missing
    pub name: String,

    /// Command whose output is searched for the component
    pub probe: String,

    /// Substring that marks the component as present. Defaults to the
    /// component's name. Mutually exclusive with `pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    /// Regular expression alternative to `contains`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Remediation shown when the component is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
