//! Integration tests for the preflight binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("preflight.yml"), config).unwrap();
    temp
}

/// A check whose probe always succeeds and always meets its minimum.
const PASSING_CONFIG: &str = r#"
checks:
  - name: greeter
    command: echo v3.2.1
    minimum: "1"
"#;

#[test]
fn cli_no_args_runs_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All 1 prerequisite checks passed"));
    Ok(())
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("prerequisite verification"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_check_reports_version_and_minimum() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.arg("check");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("greeter"))
        .stdout(predicate::str::contains("3.2.1"))
        .stdout(predicate::str::contains("minimum 1.0.0"));
    Ok(())
}

#[test]
fn cli_check_fails_when_version_below_minimum() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: greeter
    command: echo v3.2.1
    minimum: "99"
    hint: upgrade greeter to 99
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("3.2.1 is below minimum 99.0.0"))
        .stdout(predicate::str::contains("upgrade greeter to 99"));
    Ok(())
}

#[test]
fn cli_check_reports_missing_binary() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: ghost
    command: definitely-not-a-real-binary-x9y8z7 --version
    minimum: "1"
    hint: install ghost first
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("not installed"))
        .stdout(predicate::str::contains("install ghost first"));
    Ok(())
}

#[test]
fn cli_check_reports_unreadable_version() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: cryptic
    command: echo no numerals here
    minimum: "1"
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("version could not be determined"))
        .stdout(predicate::str::contains("below minimum").not());
    Ok(())
}

#[test]
fn cli_check_reports_missing_component() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: greeter
    command: echo v3.2.1
    minimum: "1"
    components:
      - name: export-plugin
        probe: echo installed plugins (none)
        hint: greeter install export-plugin
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("missing: export-plugin"))
        .stdout(predicate::str::contains("greeter install export-plugin"));
    Ok(())
}

#[test]
fn cli_check_finds_component_in_probe_output() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: greeter
    command: echo v3.2.1
    minimum: "1"
    components:
      - name: export-plugin
        probe: echo export-plugin 1.2.0
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All 1 prerequisite checks passed"));
    Ok(())
}

#[test]
fn cli_check_times_out_slow_probe() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: sleeper
    command: sleep 5
    minimum: "1"
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["check", "--timeout", "1"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("probe timed out (sleep 5)"));
    Ok(())
}

#[test]
fn cli_check_deadline_zero_times_out_every_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["check", "--deadline", "0"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("probe timed out"));
    Ok(())
}

#[test]
fn cli_check_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["check", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["passed"], true);
    assert_eq!(report["total"], 1);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["checks"][0]["name"], "greeter");
    assert_eq!(report["checks"][0]["status"], "satisfied");
    assert_eq!(report["checks"][0]["version"], "3.2.1");
    Ok(())
}

#[test]
fn cli_check_json_failure_sets_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: ghost
    command: definitely-not-a-real-binary-x9y8z7
    minimum: "1"
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["check", "--json"]);
    let output = cmd.assert().code(1).get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["passed"], false);
    assert_eq!(report["checks"][0]["status"], "not_installed");
    assert_eq!(report["checks"][0]["installed"], false);
    Ok(())
}

#[test]
fn cli_check_only_filters_checks() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: alpha
    command: echo v3.2.1
    minimum: "1"
  - name: omega
    command: definitely-not-a-real-binary-x9y8z7
    minimum: "1"
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["check", "--only", "alpha"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("omega").not());
    Ok(())
}

#[test]
fn cli_check_unknown_only_name_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["check", "--only", "ghost"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown check: ghost"));
    Ok(())
}

#[test]
fn cli_check_missing_explicit_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["--config", "/nonexistent/preflight.yml", "check"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_check_invalid_minimum_fails() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: node
    command: node --version
    minimum: latest
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("no version number found in minimum"));
    Ok(())
}

#[test]
fn cli_check_malformed_yaml_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("checks: [unclosed");
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_check_empty_registry_passes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("checks: []");
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No prerequisite checks configured"));
    Ok(())
}

#[test]
fn cli_check_discovers_config_from_subdirectory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let nested = temp.path().join("src").join("deep");
    fs::create_dir_all(&nested)?;
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(&nested);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All 1 prerequisite checks passed"));
    Ok(())
}

#[test]
fn cli_check_version_command_overrides_probe() -> Result<(), Box<dyn std::error::Error>> {
    let config = r#"
checks:
  - name: split
    command: echo tool is present
    version_command: echo v5.0.0
    minimum: "5"
"#;
    let temp = setup_project(config);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("5.0.0"));
    Ok(())
}

#[test]
fn cli_check_env_var_sets_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let config_home = setup_project(PASSING_CONFIG);
    let work_dir = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(work_dir.path());
    cmd.env("PREFLIGHT_CONFIG", config_home.path().join("preflight.yml"));
    cmd.arg("check");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All 1 prerequisite checks passed"));
    Ok(())
}

#[test]
fn cli_quiet_hides_passing_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["--quiet", "check"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All 1 prerequisite checks passed"))
        .stdout(predicate::str::contains("3.2.1").not());
    Ok(())
}

#[test]
fn cli_verbose_echoes_probe_commands() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["--verbose", "check"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("$ echo v3.2.1"));
    Ok(())
}

#[test]
fn cli_list_shows_builtin_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("built-in defaults"))
        .stdout(predicate::str::contains("node"))
        .stdout(predicate::str::contains("npm"))
        .stdout(predicate::str::contains("poetry"))
        .stdout(predicate::str::contains("poetry-plugin-export"));
    Ok(())
}

#[test]
fn cli_list_shows_configured_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("greeter"))
        .stdout(predicate::str::contains("echo v3.2.1"))
        .stdout(predicate::str::contains("minimum 1.0.0"));
    Ok(())
}

#[test]
fn cli_list_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["list", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let listing: serde_json::Value = serde_json::from_slice(&output)?;
    assert!(listing["source"]
        .as_str()
        .is_some_and(|s| s.ends_with("preflight.yml")));
    assert_eq!(listing["checks"][0]["name"], "greeter");
    assert_eq!(listing["checks"][0]["minimum"], "1.0.0");
    Ok(())
}

#[test]
fn cli_init_creates_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.arg("init");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(temp.path().join("preflight.yml").exists());
    Ok(())
}

#[test]
fn cli_init_fails_if_config_exists() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(PASSING_CONFIG);
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.arg("init");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    Ok(())
}

#[test]
fn cli_init_force_overwrites() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("checks: []");
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["init", "--force"]);
    cmd.assert().success();

    let written = fs::read_to_string(temp.path().join("preflight.yml"))?;
    assert!(written.contains("name: node"));
    Ok(())
}

#[test]
fn cli_init_then_list_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut init = Command::new(cargo_bin("preflight"));
    init.current_dir(temp.path());
    init.arg("init");
    init.assert().success();

    let mut list = Command::new(cargo_bin("preflight"));
    list.current_dir(temp.path());
    list.arg("list");
    list.assert()
        .success()
        .stdout(predicate::str::contains("preflight.yml"))
        .stdout(predicate::str::contains("poetry"));
    Ok(())
}

#[test]
fn cli_completions_generates_bash_script() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("preflight"));
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.current_dir(temp.path());
    cmd.args(["--debug", "list"]);
    cmd.assert().success();
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preflight"));
    cmd.arg("invalid-command");
    cmd.assert().failure();
    Ok(())
}
