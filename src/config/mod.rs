//! Configuration loading and parsing.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use preflight::config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("preflight.yml"),
//!     "checks:\n  - name: node\n    command: node --version\n    minimum: \"20\"\n",
//! )
//! .unwrap();
//!
//! let loaded = config::load(None, temp.path()).unwrap().unwrap();
//! assert_eq!(loaded.config.checks[0].name, "node");
//! ```
//!
//! # Configuration File Locations
//!
//! With `--config` (or `PREFLIGHT_CONFIG`) the named file is loaded
//! as-is. Otherwise discovery walks up from the working directory
//! looking for `preflight.yml` or `preflight.yaml`; without a hit, the
//! built-in checks apply.

pub mod loader;
pub mod schema;

// Schema re-exports
pub use schema::{
    CheckConfig, ComponentConfig, DefaultsConfig, PreflightConfig, DEFAULT_TIMEOUT_SECS,
};

// Loader re-exports
pub use loader::{discover, load, load_config_file, parse_config, LoadedConfig, CONFIG_FILE_NAMES};
