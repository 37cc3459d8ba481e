//! CLI E2E smoke tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../crates/testkit/fixtures")
        .join(name)
}

fn run_validate_json(paths: &[PathBuf]) -> io::Result<String> {
    let output = Command::new(env!("CARGO_BIN_EXE_fieldset"))
        .args(["--output", "json", "--no-progress", "validate", "--path"])
        .args(paths)
        .output()?;

    match output.status.code() {
        Some(0 | 2) => Ok(String::from_utf8_lossy(&output.stdout).to_string()),
        code => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(io::Error::other(format!(
                "validate exited with {code:?}: {stderr}"
            )))
        },
    }
}

#[test]
fn validate_output_is_deterministic() -> io::Result<()> {
    let paths = [
        fixture("blog_post.json"),
        fixture("mixed_errors.json"),
        fixture("layout.json"),
        fixture("documents/pages.toml"),
    ];
    let first = run_validate_json(&paths)?;
    let second = run_validate_json(&paths)?;

    assert_eq!(first, second, "validate output should be deterministic");

    Ok(())
}

#[test]
fn info_json_is_stable() -> io::Result<()> {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_fieldset"))
            .args(["--output", "json", "info"])
            .output()
    };
    let first = run()?;
    let second = run()?;

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}
