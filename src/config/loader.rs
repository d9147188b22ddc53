//! Configuration file discovery and loading.
//!
//! This module handles finding preflight.yml by walking up from the
//! working directory and loading it into typed configuration.

use crate::config::schema::PreflightConfig;
use crate::error::{PreflightError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed during discovery, in preference order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["preflight.yml", "preflight.yaml"];

/// A parsed configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Path the configuration was read from.
    pub path: PathBuf,
    pub config: PreflightConfig,
}

/// Find a config file by walking up from `start` towards the filesystem
/// root. The first directory containing one of [`CONFIG_FILE_NAMES`]
/// wins, `.yml` before `.yaml`.
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into PreflightConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PreflightConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreflightError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PreflightError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into PreflightConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<PreflightConfig> {
    serde_yaml::from_str(content).map_err(|e| PreflightError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve configuration for a run.
///
/// An explicit path is loaded directly and must exist. Without one,
/// discovery walks up from `working_dir`; finding nothing is not an
/// error, it returns `None` so the caller can fall back to the built-in
/// checks.
pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Option<LoadedConfig>> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        tracing::debug!("loaded config from {}", path.display());
        return Ok(Some(LoadedConfig {
            path: path.to_path_buf(),
            config,
        }));
    }

    match discover(working_dir) {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::debug!("discovered config at {}", path.display());
            Ok(Some(LoadedConfig { path, config }))
        }
        None => {
            tracing::debug!("no config file found, using built-in checks");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
checks:
  - name: node
    command: node --version
    minimum: "20"
"#;

    #[test]
    fn discover_finds_config_in_start_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("preflight.yml"), MINIMAL).unwrap();

        let found = discover(temp.path()).unwrap();
        assert_eq!(found, temp.path().join("preflight.yml"));
    }

    #[test]
    fn discover_walks_up_to_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("preflight.yml"), MINIMAL).unwrap();

        let found = discover(&nested).unwrap();
        assert_eq!(found, temp.path().join("preflight.yml"));
    }

    #[test]
    fn discover_accepts_the_yaml_extension() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("preflight.yaml"), MINIMAL).unwrap();

        let found = discover(temp.path()).unwrap();
        assert_eq!(found, temp.path().join("preflight.yaml"));
    }

    #[test]
    fn discover_prefers_yml_over_yaml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("preflight.yml"), MINIMAL).unwrap();
        fs::write(temp.path().join("preflight.yaml"), MINIMAL).unwrap();

        let found = discover(temp.path()).unwrap();
        assert_eq!(found, temp.path().join("preflight.yml"));
    }

    #[test]
    fn nearest_config_wins_over_ancestors() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("project");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("preflight.yml"), MINIMAL).unwrap();
        fs::write(nested.join("preflight.yml"), MINIMAL).unwrap();

        let found = discover(&nested).unwrap();
        assert_eq!(found, nested.join("preflight.yml"));
    }

    #[test]
    fn load_config_file_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preflight.yml");
        fs::write(&path, MINIMAL).unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.checks.len(), 1);
        assert_eq!(config.checks[0].name, "node");
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/preflight.yml"));
        assert!(matches!(result, Err(PreflightError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let content = "checks: [unclosed";
        let result = parse_config(content, Path::new("preflight.yml"));
        assert!(matches!(result, Err(PreflightError::ConfigParseError { .. })));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("preflight.yml"));
    }

    #[test]
    fn load_with_explicit_path_skips_discovery() {
        let temp = TempDir::new().unwrap();
        let custom = temp.path().join("custom.yml");
        fs::write(&custom, MINIMAL).unwrap();
        // A discoverable file that must not be picked up.
        fs::write(temp.path().join("preflight.yml"), "checks: []").unwrap();

        let loaded = load(Some(&custom), temp.path()).unwrap().unwrap();
        assert_eq!(loaded.path, custom);
        assert_eq!(loaded.config.checks.len(), 1);
    }

    #[test]
    fn load_with_missing_explicit_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load(Some(Path::new("/nonexistent/preflight.yml")), temp.path());
        assert!(matches!(result, Err(PreflightError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_without_config_returns_none() {
        let temp = TempDir::new().unwrap();
        let loaded = load(None, temp.path()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_discovers_and_records_the_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("preflight.yml"), MINIMAL).unwrap();

        let loaded = load(None, temp.path()).unwrap().unwrap();
        assert_eq!(loaded.path, temp.path().join("preflight.yml"));
        assert_eq!(loaded.config.checks[0].name, "node");
    }
}
