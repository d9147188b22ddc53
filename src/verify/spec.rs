//! Declarative check specifications.
//!
//! A [`ToolCheck`] says what must be true of one external tool: it can be
//! probed, its version meets a minimum, and its required components are
//! present. Specifications carry no results; the engine pairs them with
//! outcomes in [`super::status`].

use regex::Regex;

use crate::probe::Invocation;
use crate::version::Version;

/// How a component's presence is recognized in probe output.
#[derive(Debug, Clone)]
pub enum Detection {
    /// Output must contain this substring.
    Substring(String),
    /// Output must match this pattern.
    Pattern(Regex),
}

impl Detection {
    pub fn matches(&self, output: &str) -> bool {
        match self {
            Self::Substring(needle) => output.contains(needle.as_str()),
            Self::Pattern(pattern) => pattern.is_match(output),
        }
    }
}

/// A required sub-component of a tool, such as a plugin or extension.
#[derive(Debug, Clone)]
pub struct ComponentCheck {
    /// Name reported when the component is missing.
    pub name: String,
    /// Probe whose output is searched for the component.
    pub probe: Invocation,
    pub detect: Detection,
    /// Remediation echoed when the component is missing.
    pub hint: Option<String>,
}

/// One tool requirement: presence, minimum version, required components.
#[derive(Debug, Clone)]
pub struct ToolCheck {
    /// Display name, also the selector for `--only`.
    pub name: String,
    /// Presence probe. Doubles as the version probe unless
    /// `version_probe` is set.
    pub probe: Invocation,
    /// Separate probe for tools whose presence probe prints no version.
    pub version_probe: Option<Invocation>,
    /// Minimum acceptable version, compared inclusively.
    pub minimum: Version,
    /// Remediation echoed when the tool is absent, too old, or its
    /// version cannot be read.
    pub hint: Option<String>,
    /// Components verified only after the version gate passes.
    pub components: Vec<ComponentCheck>,
}
