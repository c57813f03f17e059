//! Integration tests for the lintfold CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const CATALOG: &str = r#"
providers:
  eslint-plugin-react-refresh:
    rules: [only-export-components]
presets:
  prettier:
    - rules:
        curly: off
        quotes: off
"#;

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("lintfold").unwrap();
    cmd.env_remove("LINTFOLD_CONFIG")
        .env_remove("LINTFOLD_CATALOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper function to create a temporary project with a config and a catalog
fn create_test_project(config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lintfold.config.json"), config).unwrap();
    fs::write(temp_dir.path().join("catalog.yaml"), CATALOG).unwrap();
    temp_dir
}

const VALID_CONFIG: &str = r#"[
  { "ignores": ["dist"] },
  { "files": ["**/*.{js,jsx}"] },
  "lintfold:recommended",
  "prettier",
  {
    "plugins": { "react-refresh": "eslint-plugin-react-refresh" },
    "rules": {
      "no-var": "error",
      "react-refresh/only-export-components": ["warn", { "allowConstantExport": true }]
    }
  },
  { "rules": { "no-var": "off" } }
]"#;

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("print-config"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_version_detailed() {
    cli()
        .args(["version", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION))
        .stdout(predicate::str::contains("Build information:"));
}

#[test]
fn test_resolve_json() {
    let project = create_test_project(VALID_CONFIG);

    let output = cli()
        .current_dir(project.path())
        .args(["--catalog", "catalog.yaml", "resolve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let resolved: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resolved["rules"]["no-var"], "off");
    assert_eq!(resolved["rules"]["curly"], "off");
    assert_eq!(
        resolved["rules"]["react-refresh/only-export-components"],
        serde_json::json!(["warn", { "allowConstantExport": true }])
    );
    assert_eq!(resolved["ignores"], serde_json::json!(["dist"]));
}

#[test]
fn test_resolve_human() {
    let project = create_test_project(VALID_CONFIG);

    cli()
        .current_dir(project.path())
        .args(["--no-color", "--catalog", "catalog.yaml", "resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved"))
        .stdout(predicate::str::contains(
            "react-refresh -> eslint-plugin-react-refresh",
        ));
}

#[test]
fn test_resolve_reports_unknown_rule() {
    let project = create_test_project(r#"[{ "rules": { "foo/bar": "error" } }]"#);

    cli()
        .current_dir(project.path())
        .args(["--no-color", "resolve"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("unknown rule 'foo/bar'"));
}

#[test]
fn test_resolve_reports_every_error() {
    let project = create_test_project(
        r#"[
          { "ignores": [1] },
          "no-such-preset",
          { "rules": { "definitely-not-a-rule": "warn" } }
        ]"#,
    );

    cli()
        .current_dir(project.path())
        .args(["--no-color", "resolve"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("3 errors"))
        .stdout(predicate::str::contains("unknown preset 'no-such-preset'"))
        .stdout(predicate::str::contains("definitely-not-a-rule"));
}

#[test]
fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .arg("resolve")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_config_env_var() {
    let project = create_test_project(VALID_CONFIG);
    let elsewhere = TempDir::new().unwrap();

    cli()
        .current_dir(elsewhere.path())
        .env("LINTFOLD_CONFIG", project.path().join("lintfold.config.json"))
        .env("LINTFOLD_CATALOG", project.path().join("catalog.yaml"))
        .args(["resolve", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"no-var\": \"off\""));
}

#[test]
fn test_print_config_for_linted_file() {
    let project = create_test_project(VALID_CONFIG);

    let output = cli()
        .current_dir(project.path())
        .args(["--catalog", "catalog.yaml", "print-config", "src/App.jsx"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["rules"]["no-debugger"], "error");
    assert_eq!(config["plugins"]["react-refresh"], "eslint-plugin-react-refresh");
}

#[test]
fn test_print_config_for_ignored_file() {
    let project = create_test_project(VALID_CONFIG);

    cli()
        .current_dir(project.path())
        .args(["--catalog", "catalog.yaml", "print-config", "dist/bundle.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"linted\": false"))
        .stdout(predicate::str::contains("\"ignored\": true"));
}

#[test]
fn test_print_config_for_unmatched_file() {
    let project = create_test_project(VALID_CONFIG);

    cli()
        .current_dir(project.path())
        .args(["--catalog", "catalog.yaml", "print-config", "README.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"linted\": false"))
        .stdout(predicate::str::contains("\"ignored\": false"));

    cli()
        .current_dir(project.path())
        .args([
            "--no-color",
            "--catalog",
            "catalog.yaml",
            "print-config",
            "README.md",
            "--format",
            "human",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not matched by any files pattern"));
}

#[test]
fn test_print_config_plugin_registered_for_other_files() {
    let project = create_test_project(
        r#"[
          {
            "files": ["**/*.ts"],
            "plugins": { "react-refresh": "eslint-plugin-react-refresh" }
          },
          {
            "files": ["**/*.js"],
            "rules": { "react-refresh/only-export-components": "warn" }
          }
        ]"#,
    );

    cli()
        .current_dir(project.path())
        .args(["--no-color", "--catalog", "catalog.yaml", "resolve"])
        .assert()
        .success();

    cli()
        .current_dir(project.path())
        .args(["--no-color", "--catalog", "catalog.yaml", "print-config", "src/a.js"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "unknown rule 'react-refresh/only-export-components'",
        ));
}

#[test]
fn test_rules_lists_builtin() {
    cli()
        .args(["--no-color", "rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in"))
        .stdout(predicate::str::contains("no-var"));
}

#[test]
fn test_rules_for_provider() {
    let project = create_test_project(VALID_CONFIG);

    cli()
        .current_dir(project.path())
        .args([
            "--catalog",
            "catalog.yaml",
            "rules",
            "--provider",
            "eslint-plugin-react-refresh",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("only-export-components"))
        .stdout(predicate::str::contains("no-var").not());
}

#[test]
fn test_rules_unknown_provider_fails() {
    cli()
        .args(["rules", "--provider", "eslint-plugin-nope"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_and_validate() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lintfold.config.json"));
    assert!(temp_dir.path().join("lintfold.config.json").exists());

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lintfold.config.json"), "[]").unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .failure();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_init_yaml_validates() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--format", "yaml"])
        .assert()
        .success();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "validate", "lintfold.config.yaml"])
        .assert()
        .success();
}
