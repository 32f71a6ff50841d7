//! # Dampener - report safety checks
//!
//! Dampener reads reactor reports (lines of integer levels) and counts how
//! many are safe: levels must move in one direction by a bounded step. The
//! problem dampener tolerates a single bad level per report.
//!
//! ## Modules
//!
//! - [`safety`] - Safety evaluation with single-removal recovery
//! - [`report`] - Parsing one line into a report
//! - [`reports`] - Batches of reports and safe counts
//! - [`config`] - Configuration loading and validation
//! - [`lists`] - Paired location list distance and similarity
//! - [`instructions`] - `mul`/`do`/`don't` instruction scan
//! - [`ui`] - Quiet mode detection and shared colors
//!
//! ## Example
//!
//! ```
//! use dampener::reports::{ParsePolicy, Reports};
//! use dampener::safety::SafetyEvaluator;
//!
//! let reports = Reports::parse("7 6 4 2 1\n1 3 2 4 5\n", ParsePolicy::Halt).unwrap();
//! let summary = reports.summarize(&SafetyEvaluator::default());
//!
//! assert_eq!(summary.safe, 1);
//! assert_eq!(summary.safe_with_dampener, 2);
//! ```

pub mod config;
pub mod instructions;
pub mod lists;
pub mod report;
pub mod reports;
pub mod safety;
pub mod ui;

/// Default file locations, relative to the working directory.
pub mod paths {
    /// Project configuration: `dampener.md`
    pub const CONFIG_FILE: &str = "dampener.md";
    /// Reports, one per line: `inputs.txt`
    pub const REPORTS_INPUT: &str = "inputs.txt";
    /// Paired location lists: `lists.txt`
    pub const LISTS_INPUT: &str = "lists.txt";
    /// Corrupted instruction memory: `input.txt`
    pub const SCAN_INPUT: &str = "input.txt";
}
