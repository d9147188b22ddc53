//! Error types for preflight operations.
//!
//! This module defines [`PreflightError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! Per-check failures (tool absent, version too low, missing component) are
//! not errors: they are recorded in the verification report and surfaced
//! through the exit code. `PreflightError` covers the cases where preflight
//! itself cannot proceed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for preflight operations.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// Configuration file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Referenced check does not exist in the registry.
    #[error("Unknown check: {name}")]
    UnknownCheck { name: String },

    /// A probe could not be executed for reasons other than the binary
    /// being absent (host-level failure, not an environment verdict).
    #[error("Failed to run probe '{command}': {message}")]
    ProbeFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, PreflightError>;
