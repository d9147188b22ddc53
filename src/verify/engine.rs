//! Sequential evaluation of checks against the host.
//!
//! The engine walks the checks in declaration order and records one
//! result per check. A failing check never aborts the run; the report
//! carries every outcome so a missing tool cannot mask the status of
//! the tools after it.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::probe::{Invocation, ProbeOutput, ProbeRunner};
use crate::report::{Reporter, StatusIcon};
use crate::verify::spec::{ComponentCheck, ToolCheck};
use crate::verify::status::{CheckResult, CheckStatus, VerificationReport};
use crate::version;

/// Per-probe allowance used when neither configuration nor flags name
/// one.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs checks one at a time and assembles the report.
pub struct VerificationEngine<'a> {
    runner: &'a dyn ProbeRunner,
    probe_timeout: Duration,
    deadline: Option<Duration>,
}

impl<'a> VerificationEngine<'a> {
    pub fn new(runner: &'a dyn ProbeRunner) -> Self {
        Self {
            runner,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            deadline: None,
        }
    }

    /// Set the per-probe allowance.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Bound the whole run. Each probe then gets the smaller of the
    /// per-probe allowance and whatever remains of the deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Verify every check, reporting progress as results arrive.
    ///
    /// Probe-level failures become statuses on the results. `Err` means
    /// the host itself misbehaved and the run could not continue.
    pub fn run(
        &self,
        checks: &[ToolCheck],
        reporter: &mut dyn Reporter,
    ) -> Result<VerificationReport> {
        let started = Instant::now();
        reporter.run_started(checks);

        let mut results = Vec::with_capacity(checks.len());
        for check in checks {
            reporter.check_started(check);
            let result = self.verify_check(check, started, reporter)?;
            let icon = if result.passed() {
                StatusIcon::Pass
            } else {
                StatusIcon::Fail
            };
            tracing::debug!("{} {}: {}", icon.bracketed(), check.name, result.status.key());
            reporter.check_finished(&result);
            results.push(result);
        }

        let report = VerificationReport::new(results);
        reporter.run_finished(&report);
        Ok(report)
    }

    fn verify_check(
        &self,
        check: &ToolCheck,
        started: Instant,
        reporter: &mut dyn Reporter,
    ) -> Result<CheckResult> {
        let presence = self.run_probe(&check.probe, started, reporter)?;
        if presence.timed_out {
            return Ok(timed_out(check, &check.probe, None));
        }
        if !presence.found {
            return Ok(CheckResult {
                check: check.clone(),
                status: CheckStatus::NotInstalled,
                version: None,
                missing_components: Vec::new(),
            });
        }

        let version_output = match &check.version_probe {
            Some(probe) => {
                let output = self.run_probe(probe, started, reporter)?;
                if output.timed_out {
                    return Ok(timed_out(check, probe, None));
                }
                if !output.found {
                    // The dedicated version binary is itself missing.
                    return Ok(CheckResult {
                        check: check.clone(),
                        status: CheckStatus::NotInstalled,
                        version: None,
                        missing_components: Vec::new(),
                    });
                }
                output
            }
            None => presence,
        };

        // Version text usually lands on stdout, but some tools print it
        // to stderr instead.
        let parsed = version::extract(&version_output.stdout)
            .or_else(|| version::extract(&version_output.stderr));

        let Some(found) = parsed else {
            return Ok(CheckResult {
                check: check.clone(),
                status: CheckStatus::VersionUnknown {
                    output: summarize_output(&version_output),
                },
                version: None,
                missing_components: Vec::new(),
            });
        };

        if !found.meets_minimum(&check.minimum) {
            // Too old: component probes would only add noise under the
            // version failure, so they are skipped.
            return Ok(CheckResult {
                check: check.clone(),
                status: CheckStatus::VersionTooLow { found },
                version: Some(found),
                missing_components: Vec::new(),
            });
        }

        let mut missing = Vec::new();
        for component in &check.components {
            let output = self.run_probe(&component.probe, started, reporter)?;
            if output.timed_out {
                return Ok(timed_out(check, &component.probe, Some(found)));
            }
            if !component_present(component, &output) {
                missing.push(component.name.clone());
            }
        }

        Ok(CheckResult {
            check: check.clone(),
            status: CheckStatus::Satisfied,
            version: Some(found),
            missing_components: missing,
        })
    }

    fn run_probe(
        &self,
        invocation: &Invocation,
        started: Instant,
        reporter: &mut dyn Reporter,
    ) -> Result<ProbeOutput> {
        match self.allowance(started) {
            Some(allowance) => {
                reporter.probe_started(invocation);
                self.runner.run(invocation, allowance)
            }
            // Deadline already spent: record the timeout without spawning.
            None => Ok(ProbeOutput::expired()),
        }
    }

    /// Allowance for the next probe, or `None` once the run deadline has
    /// lapsed.
    fn allowance(&self, started: Instant) -> Option<Duration> {
        match self.deadline {
            None => Some(self.probe_timeout),
            Some(deadline) => {
                let remaining = deadline.checked_sub(started.elapsed())?;
                if remaining.is_zero() {
                    None
                } else {
                    Some(self.probe_timeout.min(remaining))
                }
            }
        }
    }
}

fn timed_out(check: &ToolCheck, probe: &Invocation, found: Option<version::Version>) -> CheckResult {
    CheckResult {
        check: check.clone(),
        status: CheckStatus::TimedOut {
            probe: probe.to_string(),
        },
        version: found,
        missing_components: Vec::new(),
    }
}

/// A component counts as present only when its probe exited zero and the
/// detection predicate matches the output. A failing probe binary scopes
/// to this component; it does not fail the whole check.
fn component_present(component: &ComponentCheck, output: &ProbeOutput) -> bool {
    output.success() && component.detect.matches(&output.stdout)
}

/// First non-empty line of whichever stream had content, trimmed and
/// bounded, for the "version unknown" diagnostic.
fn summarize_output(output: &ProbeOutput) -> String {
    let text = if output.stdout.trim().is_empty() {
        &output.stderr
    } else {
        &output.stdout
    };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .chars()
        .take(120)
        .collect()
}
