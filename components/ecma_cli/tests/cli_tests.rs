//! CLI workflow tests
//!
//! Argument parsing, options files and end-to-end runs over temporary files.

use clap::Parser as ClapParser;
use ecma_cli::{Cli, CliError, Input, Runner};
use ecma_parser::SourceType;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// No arguments parses but has no input
#[test]
fn cli_parse_no_args() {
    let cli = Cli::try_parse_from(["ecma-parse"]).unwrap();
    assert!(cli.files.is_empty());
    assert_eq!(cli.eval, None);
    assert!(!cli.module);
    assert_eq!(cli.verbose, 0);
}

/// Several files may be given
#[test]
fn cli_parse_files() {
    let cli = Cli::try_parse_from(["ecma-parse", "a.js", "b.mjs"]).unwrap();
    assert_eq!(cli.files.len(), 2);
}

/// -e is the short form of --eval
#[test]
fn cli_parse_eval_short() {
    let cli = Cli::try_parse_from(["ecma-parse", "-e", "1 + 1"]).unwrap();
    assert_eq!(cli.eval.as_deref(), Some("1 + 1"));
}

/// Flags override the options file
#[test]
fn cli_config_file_merged_with_flags() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("options.json");
    fs::write(&config, r#"{ "sourceType": "module", "loc": true, "jsx": false }"#).unwrap();

    let cli = Cli::try_parse_from([
        "ecma-parse",
        "--config",
        config.to_str().unwrap(),
        "--jsx",
        "--commonjs",
    ])
    .unwrap();
    let options = cli.options().unwrap();
    assert_eq!(options.source_type, SourceType::Commonjs);
    assert!(options.loc);
    assert!(options.jsx);
}

/// A malformed options file is reported with its path
#[test]
fn cli_config_file_invalid() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.json");
    fs::write(&config, "{ sourceType: ").unwrap();

    let cli = Cli::try_parse_from(["ecma-parse", "-c", config.to_str().unwrap()]).unwrap();
    match cli.options() {
        Err(CliError::Config { path, .. }) => assert_eq!(path, config),
        other => panic!("unexpected {:?}", other),
    }
}

/// Missing files surface as I/O errors
#[test]
fn cli_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.js");
    assert!(matches!(Input::read(&missing), Err(CliError::Io { .. })));
}

/// Files are parsed in order and failures stay attached to their input
#[test]
fn integration_parse_files_workflow() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.js");
    let bad = dir.path().join("bad.js");
    fs::write(&good, "const answer = 42;").unwrap();
    fs::write(&bad, "const answer;").unwrap();

    let inputs = vec![Input::read(&good).unwrap(), Input::read(&bad).unwrap()];
    let runner = Runner::new(Default::default()).with_compact(true);
    let results = runner.run_all(&inputs);

    let json: serde_json::Value = serde_json::from_str(results[0].as_ref().unwrap()).unwrap();
    assert_eq!(json["body"][0]["kind"], "const");
    let err = results[1].as_ref().unwrap_err();
    assert!(err.to_string().starts_with(&format!("{}:[1:", bad.display())));
}

/// The binary prints JSON and exits 0 on success
#[test]
fn integration_binary_success() {
    let output = Command::new(env!("CARGO_BIN_EXE_ecma-parse"))
        .args(["--compact", "-e", "x"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["body"][0]["expression"]["name"], "x");
}

/// The binary exits 1 with a positioned message on a syntax error
#[test]
fn integration_binary_syntax_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.js");
    fs::write(&file, "let a;\nlet a;").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ecma-parse"))
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[2:4]: Identifier 'a' has already been declared"));
}

/// --json-errors reports diagnostics as JSON on stdout
#[test]
fn integration_binary_json_errors() {
    let output = Command::new(env!("CARGO_BIN_EXE_ecma-parse"))
        .args(["--json-errors", "--module", "-e", "with (a) {}"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["file"], "<eval>");
    assert_eq!(report["category"], "strict");
    assert_eq!(report["line"], 1);
}

/// No input is an error
#[test]
fn integration_binary_no_input() {
    let output = Command::new(env!("CARGO_BIN_EXE_ecma-parse")).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}
