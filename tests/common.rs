//! Common test helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Reports from the puzzle description: 2 safe, 4 safe with the dampener.
#[allow(dead_code)]
pub const SAMPLE_REPORTS: &str = "7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
";

/// Write `content` to `name` inside `dir` and return the path.
#[allow(dead_code)]
pub fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test input");
    path
}

/// Run the dampener binary in `dir` with an isolated HOME.
#[allow(dead_code)]
pub fn run_dampener(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dampener"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("DAMPENER_QUIET")
        .output()
        .expect("Failed to run dampener")
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
