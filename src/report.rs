//! A single report: one line of integer levels.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::safety::{self, SafetyEvaluator};

/// Error produced when a line cannot be turned into a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line had no tokens at all
    Empty,
    /// A token was not a valid integer
    InvalidToken { token: String, position: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Report has no levels"),
            ParseError::InvalidToken { token, position } => {
                write!(f, "Level {} is not an integer: {:?}", position + 1, token)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Ordered levels of one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    levels: Vec<i64>,
}

impl Report {
    pub fn new(levels: Vec<i64>) -> Self {
        Self { levels }
    }

    /// Parse whitespace- and/or comma-delimited integers.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let levels = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .enumerate()
            .map(|(position, token)| {
                token.parse::<i64>().map_err(|_| ParseError::InvalidToken {
                    token: token.to_string(),
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if levels.is_empty() {
            return Err(ParseError::Empty);
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[i64] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Copy of this report with the level at `index` dropped.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn without(&self, index: usize) -> Option<Report> {
        (index < self.levels.len()).then(|| Report::new(safety::without(&self.levels, index)))
    }

    pub fn is_safe(&self, evaluator: &SafetyEvaluator, budget: u32) -> bool {
        evaluator.is_safe(&self.levels, budget)
    }
}

impl FromStr for Report {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Report::parse(s)
    }
}

impl From<Vec<i64>> for Report {
    fn from(levels: Vec<i64>) -> Self {
        Report::new(levels)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .levels
            .iter()
            .map(|level| level.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{}]", joined)
    }
}
