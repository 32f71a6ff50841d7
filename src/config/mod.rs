//! Configuration management for dampener.
//!
//! Configuration lives in the YAML frontmatter of a markdown file, so the
//! body can carry notes about the puzzle inputs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::reports::ParsePolicy;
use crate::safety::SafetyEvaluator;

pub mod defaults;
pub mod validation;

pub use defaults::*;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration with merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/dampener/config.md)
    /// 2. Project config (./dampener.md)
    pub fn load() -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Path::new(crate::paths::CONFIG_FILE),
        )
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    /// Load the config at `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let frontmatter = extract_frontmatter(content)?;

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;

        config.reports.validate()?;

        Ok(config)
    }

    /// Load merged configuration from the given global and project paths.
    /// Either file may be missing; missing values fall back to defaults.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.reports.validate()?;

        Ok(config)
    }

    /// Evaluator configured with this config's step bounds.
    pub fn evaluator(&self) -> SafetyEvaluator {
        SafetyEvaluator::new(self.reports.step_bounds())
    }

    pub fn reports_input(&self) -> PathBuf {
        expand_path(&self.reports.input)
    }

    pub fn lists_input(&self) -> PathBuf {
        expand_path(&self.lists.input)
    }

    pub fn scan_input(&self) -> PathBuf {
        expand_path(&self.scan.input)
    }
}

/// Returns the path to the global config file at ~/.config/dampener/config.md
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/dampener/config.md"))
}

/// Split a document into its `---` delimited frontmatter and body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };

    match rest.find("---") {
        Some(end) => (Some(rest[..end].to_string()), rest[end + 3..].trim_start()),
        None => (None, content),
    }
}

fn extract_frontmatter(content: &str) -> Result<String> {
    let (frontmatter, _body) = split_frontmatter(content);
    frontmatter.context("Failed to extract frontmatter from config")
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub reports: Option<PartialReportsConfig>,
    pub lists: Option<ListsConfig>,
    pub scan: Option<ScanConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialReportsConfig {
    pub input: Option<String>,
    pub budgets: Option<Vec<u32>>,
    pub min_step: Option<i64>,
    pub max_step: Option<i64>,
    pub on_parse_error: Option<ParsePolicy>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let frontmatter = extract_frontmatter(content)?;

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge this global config with a project config.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_reports = self.reports.unwrap_or_default();
        let project_reports = project.reports.unwrap_or_default();
        let defaults = ReportsConfig::default();

        Config {
            reports: ReportsConfig {
                // Project value > global value > default
                input: project_reports
                    .input
                    .or(global_reports.input)
                    .unwrap_or(defaults.input),
                budgets: project_reports
                    .budgets
                    .or(global_reports.budgets)
                    .unwrap_or(defaults.budgets),
                min_step: project_reports
                    .min_step
                    .or(global_reports.min_step)
                    .unwrap_or(defaults.min_step),
                max_step: project_reports
                    .max_step
                    .or(global_reports.max_step)
                    .unwrap_or(defaults.max_step),
                on_parse_error: project_reports
                    .on_parse_error
                    .or(global_reports.on_parse_error)
                    .unwrap_or(defaults.on_parse_error),
            },
            lists: project.lists.or(self.lists).unwrap_or_default(),
            scan: project.scan.or(self.scan).unwrap_or_default(),
            output: project.output.or(self.output).unwrap_or_default(),
        }
    }
}
