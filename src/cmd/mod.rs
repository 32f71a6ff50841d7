//! Command module structure for dampener CLI

use anyhow::Result;
use std::path::{Path, PathBuf};

use dampener::config::{Config, OutputFormat};

pub mod check;
pub mod distance;
pub mod explain;
pub mod scan;
pub mod ui;

use ui::OutputMode;

/// Load the explicit config file if one was given (defaults when it does not
/// exist), otherwise the merged global and project config.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_or_default(path),
        None => Config::load(),
    }
}

/// Pick the output mode from flags, environment and config.
///
/// Quiet beats json; the `--json` flag beats the configured format.
pub fn output_mode(quiet: bool, json: bool, config: &Config) -> OutputMode {
    if quiet || dampener::ui::is_quiet() {
        OutputMode::Quiet
    } else if json || config.output.format == OutputFormat::Json {
        OutputMode::Json
    } else {
        OutputMode::Human
    }
}

/// The command-line path if given, otherwise the configured default.
pub fn input_path(file: Option<&Path>, configured: PathBuf) -> PathBuf {
    file.map(Path::to_path_buf).unwrap_or(configured)
}
