//! Tolerant version extraction from free-form tool output.
//!
//! Version probes return whatever the tool prints, which is rarely a bare
//! version number. The extractor here accepts the common shapes without
//! requiring per-tool parsers: a `v` prefix, wrapping parentheses, a tool
//! name in front, or trailing noise after the number.

use regex::Regex;

use super::Version;

/// Extraction patterns, tried in order against the cleaned text. The first
/// pattern that matches wins, so a parenthesized version beats a bare one:
/// `Poetry (2.0.1) using python 3.11` yields 2.0.1, not 3.11.
const VERSION_PATTERNS: [&str; 3] = [
    // Parenthesized numeral anywhere: "Poetry (2.0.1)"
    r"\((\d+(?:\.\d+)*)\)",
    // A word followed by a version: "git version 2.39.1", "openssl 3.0.2"
    r"[A-Za-z][\w.-]*\s+v?(\d+(?:\.\d+)*)",
    // First bare run of dotted numerals: "18.2.0-rc1" yields 18.2.0
    r"(\d+(?:\.\d+)*)",
];

/// Extract a [`Version`] from raw probe output.
///
/// Returns `None` when no numeral appears anywhere in the text. Callers
/// must treat that as "version unknown" rather than substituting 0.0.0,
/// which would misreport an unreadable tool as merely outdated.
pub fn extract(raw: &str) -> Option<Version> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return None;
    }

    // Fast path: output that is already a bare dotted numeral.
    if is_bare_version(&cleaned) {
        return Some(parse_components(&cleaned));
    }

    for pattern in VERSION_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(captures) = re.captures(&cleaned) {
                if let Some(matched) = captures.get(1) {
                    return Some(parse_components(matched.as_str()));
                }
            }
        }
    }

    None
}

/// Strip the decorations tools wrap around their version numbers: outer
/// whitespace, one pair of wrapping parentheses, and one leading `v` when
/// a digit follows it ("v20.1.0", but not "vim 9.0").
fn clean(raw: &str) -> String {
    let mut text = raw.trim();

    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        text = text[1..text.len() - 1].trim();
    }

    if let Some(rest) = text.strip_prefix(['v', 'V']) {
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            text = rest;
        }
    }

    text.to_string()
}

fn is_bare_version(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Split dotted text into up to three numeric components. A component that
/// is absent or fails to parse becomes zero; "2..1" is (2, 0, 1).
fn parse_components(text: &str) -> Version {
    let mut parts = text.split('.');
    Version::new(
        next_component(&mut parts),
        next_component(&mut parts),
        next_component(&mut parts),
    )
}

fn next_component<'a>(parts: &mut impl Iterator<Item = &'a str>) -> u32 {
    parts
        .next()
        .and_then(|part| part.parse().ok())
        .unwrap_or(0)
}
