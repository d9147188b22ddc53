//! Check specifications and the verification engine.
//!
//! - [`spec`] - Declarative descriptions of required tools and components
//! - [`registry`] - Built-in and configuration-derived check collections
//! - [`status`] - Per-check outcomes and the aggregate report
//! - [`engine`] - Sequential evaluation of checks against the host

pub mod engine;
pub mod registry;
pub mod spec;
pub mod status;

pub use engine::VerificationEngine;
pub use registry::CheckRegistry;
pub use spec::{ComponentCheck, Detection, ToolCheck};
pub use status::{CheckResult, CheckStatus, VerificationReport};
