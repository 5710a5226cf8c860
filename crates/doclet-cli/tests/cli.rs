//! Integration tests for the `doclet` binary.

use serde_json::Value;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const RECORDS: &str = r#"[
    {"kind": "namespace", "longname": "shapes", "name": "shapes", "description": "Shapes."},
    {"kind": "class", "longname": "shapes.Circle", "name": "Circle", "memberof": "shapes",
     "meta": {"lineno": 3}},
    {"kind": "function", "longname": "shapes.Circle#area", "name": "area",
     "memberof": "shapes.Circle", "inheritdoc": ""},
    {"kind": "function", "longname": "shapes.Circle#area", "name": "area",
     "memberof": "shapes.Circle", "inherited": true, "overrides": "shapes.Shape#area"},
    {"kind": "member", "longname": "shapes.Circle#radius", "name": "radius",
     "memberof": "shapes.Circle"},
    {"kind": "function", "longname": "shapes.helper", "name": "helper",
     "memberof": "shapes", "undocumented": true}
]"#;

fn doclet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doclet"))
        .args(args)
        .output()
        .expect("failed to launch doclet")
}

fn fixture() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    fs::write(&path, RECORDS).unwrap();
    let path = path.to_string_lossy().to_string();
    (dir, path)
}

#[test]
fn test_run_writes_tree_to_stdout() {
    let (_dir, input) = fixture();
    let output = doclet(&["run", &input, "--compact"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let tree: Value = serde_json::from_slice(&output.stdout).unwrap();
    let namespace = &tree["namespace"][0];
    assert_eq!(namespace["longname"], "shapes");
    // undocumented records are removed by default
    assert!(namespace.get("function").is_none());

    let class = &namespace["class"][0];
    assert!(class.get("meta").is_none());
    assert_eq!(class["methods"].as_array().unwrap().len(), 1);
    assert_eq!(class["methods"][0]["parentDoc"]["overrides"], "shapes.Shape#area");
    assert_eq!(class["methods"][0]["parentDoc"]["inherited"], true);
    assert_eq!(class["attributes"][0]["name"], "radius");
}

#[test]
fn test_run_with_config_and_output_file() {
    let (dir, input) = fixture();
    let config = dir.path().join("doclet.json");
    fs::write(&config, r#"{"removeQuery": {"kind": "member"}}"#).unwrap();
    let out = dir.path().join("tree.json");

    let output = doclet(&[
        "run",
        &input,
        "--config",
        config.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--meta",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let tree: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let namespace = &tree["namespace"][0];
    // the custom query replaces the default one
    assert_eq!(namespace["function"][0]["name"], "helper");
    assert_eq!(namespace["class"][0]["meta"]["lineno"], 3);
    assert!(namespace["class"][0].get("attributes").is_none());
}

#[test]
fn test_run_with_log_hooks_emits_empty_tree() {
    let (_dir, input) = fixture();
    let output = doclet(&["run", &input, "--hooks", "log", "--quiet", "--compact"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "{}");
    // quiet stubs log nothing
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_stats_json() {
    let (_dir, input) = fixture();
    let output = doclet(&["stats", &input, "--json"]);
    assert!(output.status.success());

    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["recordsIn"], 6);
    assert_eq!(stats["recordsKept"], 5);
    assert_eq!(stats["nodesAttached"], 4);
    assert_eq!(stats["maxDepth"], 2);
    assert_eq!(stats["unpaired"].as_array().unwrap().len(), 0);
}

#[test]
fn test_email_command() {
    let found = doclet(&["email", "Pookie <EM@IL.FR>"]);
    assert!(found.status.success());
    assert_eq!(String::from_utf8_lossy(&found.stdout).trim(), "EM@IL.FR");

    let missing = doclet(&["email", "Pookie <>"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("error:"));
}

#[test]
fn test_missing_input_fails() {
    let output = doclet(&["run", "/nonexistent/records.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("I/O error"));
}
