//! Check outcomes and the aggregate report.

use crate::verify::spec::ToolCheck;
use crate::version::Version;

/// Terminal outcome of verifying a single tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Binary present and its version meets the minimum. Component gaps,
    /// if any, are recorded separately on the result.
    Satisfied,
    /// The binary could not be located.
    NotInstalled,
    /// Binary present but no version number could be read from its
    /// output. Kept distinct from a low version: treating unreadable
    /// output as 0.0.0 would misreport the tool as merely outdated.
    VersionUnknown {
        /// What the version probe actually printed, first line, trimmed.
        output: String,
    },
    /// Parsed version is below the required minimum.
    VersionTooLow { found: Version },
    /// A probe exceeded its allowance. Kept distinct from NotInstalled
    /// so a hung tool is never reported as absent.
    TimedOut {
        /// The command line that timed out.
        probe: String,
    },
}

impl CheckStatus {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }

    /// Stable identifier used in machine-readable output.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Satisfied => "satisfied",
            Self::NotInstalled => "not_installed",
            Self::VersionUnknown { .. } => "version_unknown",
            Self::VersionTooLow { .. } => "version_too_low",
            Self::TimedOut { .. } => "timed_out",
        }
    }
}

/// Result of verifying one tool. Built once by the engine and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub check: ToolCheck,
    pub status: CheckStatus,
    /// Version read from probe output, when one could be parsed.
    pub version: Option<Version>,
    /// Names of required components whose detection failed, in
    /// declaration order. Only populated when the version gate passed.
    pub missing_components: Vec<String>,
}

impl CheckResult {
    pub fn installed(&self) -> bool {
        !matches!(self.status, CheckStatus::NotInstalled)
    }

    pub fn version_ok(&self) -> bool {
        self.status.is_satisfied()
    }

    /// Whether this check passes the gate: version satisfied and no
    /// missing components.
    pub fn passed(&self) -> bool {
        self.status.is_satisfied() && self.missing_components.is_empty()
    }
}

/// Ordered results of one verification run.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    results: Vec<CheckResult>,
}

impl VerificationReport {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }

    /// Overall verdict. A run with no checks passes: nothing was
    /// required, nothing failed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    /// Gate exit code: 0 on pass, 1 on any failed check.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}
