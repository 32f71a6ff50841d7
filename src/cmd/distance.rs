//! `dampener distance`: paired location list scores.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use dampener::config::Config;
use dampener::lists::LocationLists;
use dampener::ui::colors;

use super::ui::Output;

pub fn cmd_distance(config: &Config, output: &Output, file: Option<&Path>) -> Result<()> {
    let path = super::input_path(file, config.lists_input());

    output.step(&format!("Reading location lists from {}", path.display()));
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read location lists from {}", path.display()))?;
    let lists = LocationLists::parse(&content)
        .with_context(|| format!("Failed to parse location lists in {}", path.display()))?;

    let scores = lists.scores();
    let text = format!(
        "distance: {}\nsimilarity: {}",
        colors::count(scores.distance),
        colors::count(scores.similarity)
    );
    output.result(&text, &serde_json::to_value(scores)?);

    Ok(())
}
