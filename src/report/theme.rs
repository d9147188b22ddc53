//! Terminal color theme.

use console::Style;

/// Theme for terminal output styling.
pub struct Theme {
    /// Passing checks and the all-clear summary.
    pub success: Style,
    /// Failing checks and fatal errors.
    pub error: Style,
    /// De-emphasized detail.
    pub dim: Style,
    /// Check names.
    pub highlight: Style,
    /// Probe command echoes in verbose mode.
    pub command: Style,
    /// Remediation hints.
    pub hint: Style,
    /// Summary banner rules.
    pub border: Style,
}

impl Theme {
    /// Create the default color theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            command: Style::new().dim().italic(),
            hint: Style::new().magenta(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme with no styling, for non-TTY output.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            command: Style::new(),
            hint: Style::new(),
            border: Style::new(),
        }
    }

    /// Format a success message with a checkmark.
    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.success.apply_to("✓"), message)
    }

    /// Format an error message with a cross.
    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.error.apply_to("✗"), message)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether stdout wants colored output. Honors `NO_COLOR` and falls back
/// to a TTY check.
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}
