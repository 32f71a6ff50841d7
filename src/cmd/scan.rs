//! `dampener scan`: sum instructions in corrupted memory.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use dampener::config::Config;
use dampener::instructions::Instructions;
use dampener::ui::colors;

use super::ui::Output;

pub fn cmd_scan(config: &Config, output: &Output, file: Option<&Path>) -> Result<()> {
    let path = super::input_path(file, config.scan_input());

    output.step(&format!("Scanning {}", path.display()));
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read memory from {}", path.display()))?;
    let instructions = Instructions::scan(&content)
        .with_context(|| format!("Failed to scan instructions in {}", path.display()))?;
    output.step(&format!("Found {} instructions", instructions.instructions().len()));

    let totals = instructions.totals();
    let text = format!(
        "total: {}\nenabled total: {}",
        colors::count(totals.all),
        colors::count(totals.enabled)
    );
    output.result(&text, &serde_json::to_value(totals)?);

    Ok(())
}
