//! End-to-end tests for the apikeep binary
//!
//! Gated behind the `integration` feature flag. Run with:
//!
//! ```sh
//! cargo test -p apikeep-cli --features integration
//! ```
//!
//! None of these tests reach a real vendor: they only use static-only vendors,
//! local validation failures, or printing commands.

#![cfg(feature = "integration")]

use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the binary with isolated config directories.
fn apikeep(args: &[&str]) -> Output {
    let home = TempDir::new().expect("temp config home");
    Command::new(env!("CARGO_BIN_EXE_apikeep"))
        .args(args)
        .env("XDG_CONFIG_HOME", home.path())
        .env("APIKEEP_PROJECT_CONFIG_DIR", home.path().join("project"))
        .env_remove("OPENAI_API_KEY")
        .env_remove("DEEPSEEK_API_KEY")
        .output()
        .expect("Failed to run apikeep")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn apikeep_help_lists_commands() {
    let output = apikeep(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    for command in ["vendors", "vendor", "models", "auth", "template", "config"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn apikeep_vendors_shows_table() {
    let output = apikeep(&["vendors"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("OpenAI"));
    assert!(stdout.contains("https://api.deepseek.com/v1"));
    assert!(stdout.contains("static-only"));
    assert!(stdout.contains("自定义"));
}

#[test]
fn apikeep_vendor_unknown_fails() {
    let output = apikeep(&["vendor", "Acme AI"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown vendor 'Acme AI'"));
}

#[test]
fn apikeep_models_for_static_vendor_needs_no_key() {
    let output = apikeep(&["models", "智谱AI"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        stderr(&output)
    );
    let stdout = stdout(&output);
    assert!(stdout.contains("preset list"));
    assert!(stdout.contains("glm-4"));
}

#[test]
fn apikeep_models_json_for_custom_vendor() {
    let output = apikeep(&["models", "自定义", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "manual");
    assert_eq!(json["models"], serde_json::json!([]));
}

#[test]
fn apikeep_models_without_key_exits_non_zero() {
    let output = apikeep(&["models", "OpenAI"]);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("apikeep auth OpenAI"));
    assert!(stderr(&output).contains("missing credential"));
}

#[test]
fn apikeep_template_prints_snippet() {
    let output = apikeep(&["template", "DeepSeek"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("base_url=\"https://api.deepseek.com/v1\""));
}

#[test]
fn apikeep_config_show_works_without_config() {
    let output = apikeep(&["config", "show"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("[resolver]"));
    assert!(stdout.contains("timeout_secs = 10"));
    assert!(stdout.contains("env_fallback = true"));
}

#[test]
fn apikeep_config_path_shows_paths() {
    let output = apikeep(&["config", "path"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("User config:"));
    assert!(stdout.contains("Project config:"));
    assert!(stdout.contains("apikeep"));
}
