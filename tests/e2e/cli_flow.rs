//! CLI flow E2E tests: compose documents, then validate the result.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE: &str = r#"{
  "slug": "posts",
  "fields": [
    { "type": "text", "name": "title", "required": true },
    { "type": "relationship", "name": "authors", "relationTo": "users", "hasMany": true }
  ]
}"#;

const OVERRIDES_VALID: &str = r"
fields:
  - type: text
    name: title
    maxLength: 80
  - type: number
    name: rating
    hasMany: true
    maxRows: 5
";

const OVERRIDES_INVALID: &str = r"
fields:
  - type: number
    name: rating
    maxRows: 5
";

fn scratch_dir() -> io::Result<PathBuf> {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("fieldset-cli-flow-{unique}"));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn run_cli(args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_fieldset"))
        .arg("--no-progress")
        .args(args)
        .output()
}

fn merge_and_validate(dir: &Path, overrides: &str) -> io::Result<Output> {
    let base = dir.join("base.json");
    let layer = dir.join("overrides.yaml");
    let merged = dir.join("merged.json");
    std::fs::write(&base, BASE)?;
    std::fs::write(&layer, overrides)?;

    let output = run_cli(&[
        "merge",
        "--base",
        &base.to_string_lossy(),
        "--overrides",
        &layer.to_string_lossy(),
    ])?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::other(format!("merge failed: {stderr}")));
    }
    std::fs::write(&merged, &output.stdout)?;

    run_cli(&[
        "--output",
        "json",
        "validate",
        "--path",
        &merged.to_string_lossy(),
    ])
}

#[test]
fn merged_collection_validates() -> io::Result<()> {
    let dir = scratch_dir()?;
    let result = merge_and_validate(&dir, OVERRIDES_VALID);
    std::fs::remove_dir_all(&dir)?;
    let output = result?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "validate failed: {stdout}");
    let value: serde_json::Value =
        serde_json::from_str(stdout.trim()).map_err(io::Error::other)?;
    assert_eq!(value["files"][0]["nodesVisited"], 2);

    Ok(())
}

#[test]
fn override_that_breaks_gating_is_reported() -> io::Result<()> {
    let dir = scratch_dir()?;
    let result = merge_and_validate(&dir, OVERRIDES_INVALID);
    std::fs::remove_dir_all(&dir)?;
    let output = result?;

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value =
        serde_json::from_str(stdout.trim()).map_err(io::Error::other)?;
    assert_eq!(value["files"][0]["errors"][0]["path"], "fields[0].maxRows");
    assert_eq!(value["files"][0]["errors"][0]["rule"], "forbidden_attribute");

    Ok(())
}
