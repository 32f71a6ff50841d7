//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

use crate::paths;
use crate::reports::ParsePolicy;
use crate::safety::{DEFAULT_MAX_STEP, DEFAULT_MIN_STEP};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_reports_input, String, paths::REPORTS_INPUT.to_string());
default_fn!(default_lists_input, String, paths::LISTS_INPUT.to_string());
default_fn!(default_scan_input, String, paths::SCAN_INPUT.to_string());
default_fn!(default_budgets, Vec<u32>, vec![0, 1]);
default_fn!(default_min_step, i64, DEFAULT_MIN_STEP);
default_fn!(default_max_step, i64, DEFAULT_MAX_STEP);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Report checking settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportsConfig {
    /// Report file, one report per line (default: inputs.txt)
    #[serde(default = "default_reports_input")]
    pub input: String,
    /// Removal budgets to count safe reports for (default: [0, 1])
    #[serde(default = "default_budgets")]
    pub budgets: Vec<u32>,
    /// Smallest allowed step between levels (default: 1)
    #[serde(default = "default_min_step")]
    pub min_step: i64,
    /// Largest allowed step between levels (default: 3)
    #[serde(default = "default_max_step")]
    pub max_step: i64,
    /// What to do with lines that are not integers (default: halt)
    #[serde(default)]
    pub on_parse_error: ParsePolicy,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            input: default_reports_input(),
            budgets: default_budgets(),
            min_step: default_min_step(),
            max_step: default_max_step(),
            on_parse_error: ParsePolicy::default(),
        }
    }
}

/// Location list settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListsConfig {
    #[serde(default = "default_lists_input")]
    pub input: String,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            input: default_lists_input(),
        }
    }
}

/// Instruction scan settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    #[serde(default = "default_scan_input")]
    pub input: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input: default_scan_input(),
        }
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}
