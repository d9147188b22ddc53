//! Preflight - prerequisite verification for development environments.
//!
//! Preflight checks that the external tools a project depends on are
//! installed, new enough, and carrying their required plugins, from a
//! declarative YAML configuration with built-in defaults.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration discovery, loading, and schema
//! - [`error`] - Error types and result aliases
//! - [`probe`] - External process probing with timeouts
//! - [`report`] - Terminal and JSON report rendering
//! - [`verify`] - Check registry and the verification engine
//! - [`version`] - Tolerant version extraction and comparison
//!
//! # Example
//!
//! ```
//! use preflight::version::{extract, Version};
//!
//! // Pull a version out of whatever the tool printed
//! let version = extract("Poetry (version 2.0.1)").unwrap();
//! assert_eq!(version, Version::new(2, 0, 1));
//! assert!(version.meets_minimum(&Version::new(2, 0, 0)));
//! ```
//!
//! For file-based config loading, see [`config`].

pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod verify;
pub mod version;

pub use error::{PreflightError, Result};
