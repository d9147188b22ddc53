//! Version triples and tolerant extraction from tool output.
//!
//! External tools print their versions in loosely structured forms:
//! `v20.11.0`, `Poetry (version 2.0.1)`, or a bare `10`. [`extract`]
//! normalizes those into a [`Version`] triple so the rest of the crate
//! can compare versions without caring how they were printed.

pub mod extract;

pub use extract::extract;

use std::fmt;
use std::str::FromStr;

/// A normalized three-component version.
///
/// Components that were absent in the source text default to zero, so
/// `20` compares as `20.0.0`. Ordering is the derived lexicographic
/// ordering on `(major, minor, patch)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether this version satisfies the given minimum.
    pub fn meets_minimum(&self, minimum: &Version) -> bool {
        self >= minimum
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    /// Parses with the same tolerance as [`extract`], so `"v20"` and
    /// `"Poetry (2.0.1)"` both work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        extract(s).ok_or_else(|| format!("no version number found in '{s}'"))
    }
}
