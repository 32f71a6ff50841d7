//! Batches of reports and the safe-count summary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::report::{ParseError, Report};
use crate::safety::SafetyEvaluator;

/// What to do with a line that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Stop at the first bad line
    #[default]
    Halt,
    /// Drop the bad line and keep going
    Skip,
}

impl fmt::Display for ParsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePolicy::Halt => write!(f, "halt"),
            ParsePolicy::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Debug)]
pub enum ReportsError {
    Parse { line: usize, source: ParseError },
}

impl fmt::Display for ReportsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportsError::Parse { line, source } => {
                write!(f, "Invalid report on line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for ReportsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportsError::Parse { source, .. } => Some(source),
        }
    }
}

/// A line dropped under [`ParsePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub error: ParseError,
}

/// Safe counts for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Reports read
    pub reports: usize,
    /// Safe with no removals
    pub safe: usize,
    /// Safe with one removal
    pub safe_with_dampener: usize,
    /// Lines dropped by the parse policy
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Reports {
    reports: Vec<Report>,
    skipped: Vec<SkippedLine>,
}

impl Reports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one raw line and append it.
    pub fn add_raw_report(&mut self, line: &str) -> Result<(), ParseError> {
        let report = Report::parse(line)?;
        self.reports.push(report);
        Ok(())
    }

    pub fn push(&mut self, report: Report) {
        self.reports.push(report);
    }

    /// Parse a whole input, one report per line. Blank lines are ignored.
    pub fn parse(text: &str, policy: ParsePolicy) -> Result<Self, ReportsError> {
        let mut reports = Reports::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            if let Err(error) = reports.add_raw_report(line) {
                let line = index + 1;
                match policy {
                    ParsePolicy::Halt => return Err(ReportsError::Parse { line, source: error }),
                    ParsePolicy::Skip => reports.skipped.push(SkippedLine { line, error }),
                }
            }
        }

        Ok(reports)
    }

    pub fn load(path: &Path, policy: ParsePolicy) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read reports from {}", path.display()))?;

        Self::parse(&content, policy)
            .with_context(|| format!("Failed to parse reports in {}", path.display()))
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn safe_reports(&self, evaluator: &SafetyEvaluator, budget: u32) -> Vec<&Report> {
        self.reports
            .iter()
            .filter(|report| report.is_safe(evaluator, budget))
            .collect()
    }

    pub fn count_safe(&self, evaluator: &SafetyEvaluator, budget: u32) -> usize {
        self.reports
            .iter()
            .filter(|report| report.is_safe(evaluator, budget))
            .count()
    }

    /// Counts with the dampener off and on.
    pub fn summarize(&self, evaluator: &SafetyEvaluator) -> Summary {
        Summary {
            reports: self.reports.len(),
            safe: self.count_safe(evaluator, 0),
            safe_with_dampener: self.count_safe(evaluator, 1),
            skipped: self.skipped.len(),
        }
    }
}

impl FromIterator<Report> for Reports {
    fn from_iter<I: IntoIterator<Item = Report>>(iter: I) -> Self {
        Self {
            reports: iter.into_iter().collect(),
            skipped: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
";

    #[test]
    fn test_parse_sample() {
        let reports = Reports::parse(SAMPLE, ParsePolicy::Halt).unwrap();
        assert_eq!(reports.len(), 6);
        assert_eq!(reports.reports()[3].levels(), &[1, 3, 2, 4, 5]);
    }

    #[test]
    fn test_summarize_sample() {
        let reports = Reports::parse(SAMPLE, ParsePolicy::Halt).unwrap();
        let summary = reports.summarize(&SafetyEvaluator::default());
        assert_eq!(
            summary,
            Summary {
                reports: 6,
                safe: 2,
                safe_with_dampener: 4,
                skipped: 0,
            }
        );
    }

    #[test]
    fn test_safe_reports_lists_matching_reports() {
        let reports = Reports::parse(SAMPLE, ParsePolicy::Halt).unwrap();
        let evaluator = SafetyEvaluator::default();
        let safe: Vec<String> = reports
            .safe_reports(&evaluator, 0)
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(safe, vec!["[7 6 4 2 1]", "[1 3 6 7 9]"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let reports = Reports::parse("\n1 2 3\n\n   \n4 5 6\n", ParsePolicy::Halt).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.skipped().is_empty());
    }

    #[test]
    fn test_halt_policy_reports_line_number() {
        let err = Reports::parse("1 2 3\n\n4 five 6\n", ParsePolicy::Halt).unwrap_err();
        let ReportsError::Parse { line, source } = &err;
        assert_eq!(*line, 3);
        assert!(matches!(source, ParseError::InvalidToken { .. }));
        assert!(err.to_string().starts_with("Invalid report on line 3"));
    }

    #[test]
    fn test_skip_policy_records_bad_lines() {
        let reports = Reports::parse("1 2 3\nbad\n4 5 6\n", ParsePolicy::Skip).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports.skipped().len(), 1);
        assert_eq!(reports.skipped()[0].line, 2);

        let summary = reports.summarize(&SafetyEvaluator::default());
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.safe, 2);
    }

    #[test]
    fn test_add_raw_report() {
        let mut reports = Reports::new();
        reports.add_raw_report("1 2").unwrap();
        assert!(reports.add_raw_report("1 ?").is_err());
        assert_eq!(reports.len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let reports: Reports = vec![Report::new(vec![1, 2]), Report::new(vec![3, 3])]
            .into_iter()
            .collect();
        assert_eq!(reports.count_safe(&SafetyEvaluator::default(), 0), 1);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = Summary {
            reports: 6,
            safe: 2,
            safe_with_dampener: 4,
            skipped: 0,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["safe_with_dampener"], 4);
    }
}
