//! Recording reporter for tests.

use crate::probe::Invocation;
use crate::verify::spec::ToolCheck;
use crate::verify::status::{CheckResult, VerificationReport};

use super::Reporter;

/// Reporter that records every event instead of printing, so tests can
/// assert on what the engine and commands emitted.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub messages: Vec<String>,
    pub errors: Vec<String>,
    /// Check counts passed to `run_started`.
    pub run_sizes: Vec<usize>,
    /// Check names in the order they started.
    pub started: Vec<String>,
    /// Probe command lines in the order they ran.
    pub probes: Vec<String>,
    /// Finished results, cloned.
    pub results: Vec<CheckResult>,
    /// Number of `run_finished` events.
    pub summaries: usize,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn run_started(&mut self, checks: &[ToolCheck]) {
        self.run_sizes.push(checks.len());
    }

    fn check_started(&mut self, check: &ToolCheck) {
        self.started.push(check.name.clone());
    }

    fn probe_started(&mut self, invocation: &Invocation) {
        self.probes.push(invocation.to_string());
    }

    fn check_finished(&mut self, result: &CheckResult) {
        self.results.push(result.clone());
    }

    fn run_finished(&mut self, _report: &VerificationReport) {
        self.summaries += 1;
    }
}
