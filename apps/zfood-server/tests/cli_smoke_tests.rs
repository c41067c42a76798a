//! CLI smoke tests for the zfood-server binary.

use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn run_zfood_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_zfood-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute zfood-server")
}

/// Config whose home_dir, log file and database all live inside `dir`.
fn write_config(dir: &Path, name: &str, modules: &str) -> String {
    let home = dir.join("home");
    let content = format!(
        r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 18080

database:
  url: "sqlite://database/test.db"
  max_conns: 2

logging:
  default:
    console_level: error
    file: ""
    file_level: error
{modules}
"#,
        home = home.to_string_lossy().replace('\\', "/"),
    );
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_zfood_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_zfood_server(&["--version"]);
    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zfood-server"), "Should contain binary name");
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_zfood_server(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Should report the invalid command: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    for flag in ["--config", "-c"] {
        let output = run_zfood_server(&[flag, "/nonexistent/zfood.yaml", "check"]);
        assert!(!output.status.success(), "Should fail with missing config");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Config file not found"),
            "Should mention the missing config file: {stderr}"
        );
    }
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_zfood_server(&["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config"),
        "Should mention config parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "valid.yaml", "");

    let output = run_zfood_server(&["--config", &config_path, "check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Should succeed with valid config\nSTDOUT: {stdout}\nSTDERR: {stderr}"
    );
    assert!(stdout.contains("Configuration check passed"));
    assert!(temp_dir.path().join("home").is_dir(), "home_dir is created");
}

#[test]
fn test_cli_check_rejects_inconsistent_page_sizes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let modules = r#"
modules:
  zfood:
    default_page_size: 500
    max_page_size: 100
"#;
    let config_path = write_config(temp_dir.path(), "paging.yaml", modules);

    let output = run_zfood_server(&["--config", &config_path, "check"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("max_page_size"),
        "Should name the offending setting: {stderr}"
    );
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "print.yaml", "");

    let output = run_zfood_server(&[
        "--config",
        &config_path,
        "--port",
        "19999",
        "--mock",
        "--print-config",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 19999"), "port override: {stdout}");
    assert!(stdout.contains("sqlite::memory:"), "mock database: {stdout}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_zfood_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Start the server"));

    let output = run_zfood_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Check configuration"));
}
