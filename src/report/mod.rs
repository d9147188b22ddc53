//! Report rendering and the reporter seam.
//!
//! - [`theme`] - Terminal color theme
//! - [`icons`] - Pass/fail glyphs
//! - [`mock`] - Recording reporter for tests
//!
//! The engine never prints; it drives a [`Reporter`], and the
//! [`ConsoleReporter`] here turns those events into terminal output.
//! The line and summary formatters are free functions so tests can pin
//! the exact rendering without capturing stdout.

pub mod icons;
pub mod mock;
pub mod theme;

pub use icons::StatusIcon;
pub use mock::RecordingReporter;
pub use theme::{should_use_colors, Theme};

use crate::probe::Invocation;
use crate::verify::spec::ToolCheck;
use crate::verify::status::{CheckResult, CheckStatus, VerificationReport};

/// Width of the `=` rules around the summary.
const BANNER_WIDTH: usize = 40;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, plus each probe's command line as it runs.
    Verbose,
    /// One line per check plus the summary.
    #[default]
    Normal,
    /// Failing checks and the summary only.
    Quiet,
    /// Nothing. Used when JSON owns stdout; the exit code carries the
    /// verdict.
    Silent,
}

impl OutputMode {
    pub fn shows_probes(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    pub fn shows_passing(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    pub fn shows_anything(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

/// Progress and output sink for one verification run.
///
/// Commands use [`message`](Reporter::message) and
/// [`error`](Reporter::error) for standalone output; the engine drives
/// the lifecycle events as results arrive.
pub trait Reporter {
    fn message(&mut self, text: &str);
    fn error(&mut self, text: &str);
    fn run_started(&mut self, checks: &[ToolCheck]);
    fn check_started(&mut self, check: &ToolCheck);
    fn probe_started(&mut self, invocation: &Invocation);
    fn check_finished(&mut self, result: &CheckResult);
    fn run_finished(&mut self, report: &VerificationReport);
}

/// Reporter that renders progressively to stdout and stderr.
pub struct ConsoleReporter {
    mode: OutputMode,
    theme: Theme,
    name_width: usize,
}

impl ConsoleReporter {
    pub fn new(mode: OutputMode, theme: Theme) -> Self {
        Self {
            mode,
            theme,
            name_width: 0,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn message(&mut self, text: &str) {
        if self.mode.shows_anything() {
            println!("{text}");
        }
    }

    fn error(&mut self, text: &str) {
        eprintln!("{}", self.theme.format_error(text));
    }

    fn run_started(&mut self, checks: &[ToolCheck]) {
        self.name_width = checks
            .iter()
            .map(|check| check.name.chars().count())
            .max()
            .unwrap_or(0);
    }

    fn check_started(&mut self, _check: &ToolCheck) {}

    fn probe_started(&mut self, invocation: &Invocation) {
        if self.mode.shows_probes() {
            println!("  {}", self.theme.command.apply_to(format!("$ {invocation}")));
        }
    }

    fn check_finished(&mut self, result: &CheckResult) {
        if !self.mode.shows_anything() {
            return;
        }
        if result.passed() && !self.mode.shows_passing() {
            return;
        }
        println!("{}", format_check_line(result, &self.theme, self.name_width));
        for line in format_component_lines(result, &self.theme) {
            println!("{line}");
        }
        for hint in format_hints(result, &self.theme) {
            println!("{hint}");
        }
    }

    fn run_finished(&mut self, report: &VerificationReport) {
        if !self.mode.shows_anything() {
            return;
        }
        println!();
        println!("{}", format_summary(report, &self.theme));
    }
}

/// One line per check: glyph, padded name, verdict.
pub fn format_check_line(result: &CheckResult, theme: &Theme, name_width: usize) -> String {
    let icon = if result.passed() {
        StatusIcon::Pass
    } else {
        StatusIcon::Fail
    };
    let name = format!("{:<width$}", result.check.name, width = name_width);

    let verdict = match &result.status {
        CheckStatus::Satisfied => {
            let version = result
                .version
                .map(|v| v.to_string())
                .unwrap_or_else(|| "?".to_string());
            if result.missing_components.is_empty() {
                format!(
                    "{} {}",
                    version,
                    theme.dim.apply_to(format!("(minimum {})", result.check.minimum))
                )
            } else {
                format!("{} {}", version, theme.dim.apply_to("(components missing)"))
            }
        }
        CheckStatus::NotInstalled => "not installed".to_string(),
        CheckStatus::VersionUnknown { output } => {
            if output.is_empty() {
                "version could not be determined".to_string()
            } else {
                format!("version could not be determined (output: {output:?})")
            }
        }
        CheckStatus::VersionTooLow { found } => {
            format!("{} is below minimum {}", found, result.check.minimum)
        }
        CheckStatus::TimedOut { probe } => format!("probe timed out ({probe})"),
    };

    format!(
        "  {} {}  {}",
        icon.styled(theme),
        theme.highlight.apply_to(name),
        verdict
    )
}

/// One line per missing component, each followed by that component's
/// hint when it has one.
pub fn format_component_lines(result: &CheckResult, theme: &Theme) -> Vec<String> {
    let mut lines = Vec::new();
    for name in &result.missing_components {
        lines.push(format!(
            "      {}",
            theme.error.apply_to(format!("missing: {name}"))
        ));
        let hint = result
            .check
            .components
            .iter()
            .find(|component| &component.name == name)
            .and_then(|component| component.hint.as_deref());
        if let Some(hint) = hint {
            lines.push(format!("      {}", theme.hint.apply_to(hint)));
        }
    }
    lines
}

/// The check-level hint for a failed check, indented under its line.
pub fn format_hints(result: &CheckResult, theme: &Theme) -> Vec<String> {
    let mut lines = Vec::new();
    if result.passed() {
        return lines;
    }

    match &result.status {
        // Component lines carry their own hints; timeouts get none.
        CheckStatus::Satisfied | CheckStatus::TimedOut { .. } => {}
        _ => {
            if let Some(hint) = &result.check.hint {
                lines.push(format!("      {}", theme.hint.apply_to(hint)));
            }
        }
    }

    lines
}

/// Summary banner: the verdict between two `=` rules.
pub fn format_summary(report: &VerificationReport, theme: &Theme) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let verdict = if report.is_empty() {
        theme.format_success("No prerequisite checks configured")
    } else if report.passed() {
        theme.format_success(&format!(
            "All {} prerequisite checks passed",
            report.len()
        ))
    } else {
        theme.format_error(&format!(
            "{} of {} prerequisite checks failed",
            report.failed_count(),
            report.len()
        ))
    };
    format!(
        "{}\n{}\n{}",
        theme.border.apply_to(&rule),
        verdict,
        theme.border.apply_to(&rule)
    )
}

/// Machine-readable rendering of a full report.
pub fn report_to_json(report: &VerificationReport) -> serde_json::Value {
    let checks: Vec<serde_json::Value> = report.results().iter().map(check_to_json).collect();
    serde_json::json!({
        "passed": report.passed(),
        "total": report.len(),
        "failed": report.failed_count(),
        "checks": checks,
    })
}

fn check_to_json(result: &CheckResult) -> serde_json::Value {
    serde_json::json!({
        "name": result.check.name,
        "status": result.status.key(),
        "passed": result.passed(),
        "installed": result.installed(),
        "version": result.version.map(|v| v.to_string()),
        "minimum": result.check.minimum.to_string(),
        "missing_components": result.missing_components,
    })
}
