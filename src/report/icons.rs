//! Status glyphs for report lines.

use super::theme::Theme;

/// Pass/fail glyph vocabulary, kept in one place so every line of the
/// report renders the same marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Pass,
    Fail,
}

impl StatusIcon {
    /// Unicode glyph for terminal output.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Fail => "✗",
        }
    }

    /// Bracketed text for consumers that cannot render the glyphs.
    pub fn bracketed(&self) -> &'static str {
        match self {
            Self::Pass => "[ok]",
            Self::Fail => "[FAIL]",
        }
    }

    /// The glyph with the theme's styling applied.
    pub fn styled(&self, theme: &Theme) -> String {
        match self {
            Self::Pass => theme.success.apply_to(self.icon()).to_string(),
            Self::Fail => theme.error.apply_to(self.icon()).to_string(),
        }
    }
}
