//! Paired location lists: total distance and similarity score.
//!
//! Input is two whitespace-separated columns of non-negative integers. The
//! distance pairs the smallest left with the smallest right and so on; the
//! similarity weights each left value by how often it appears on the right.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?P<left>[0-9]+)\s+(?P<right>[0-9]+)\s*$")
            .expect("location list pattern is valid")
    })
}

/// A line that is not exactly two integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParseError {
    /// 1-based line number
    pub line: usize,
    pub content: String,
}

impl fmt::Display for ListParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {} is not a pair of integers: {:?}",
            self.line, self.content
        )
    }
}

impl std::error::Error for ListParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListScores {
    pub pairs: usize,
    pub distance: u64,
    pub similarity: u64,
}

#[derive(Debug, Clone, Default)]
pub struct LocationLists {
    left: Vec<u64>,
    right: Vec<u64>,
}

impl LocationLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, left: u64, right: u64) {
        self.left.push(left);
        self.right.push(right);
    }

    pub fn parse(text: &str) -> Result<Self, ListParseError> {
        let mut lists = LocationLists::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let invalid = || ListParseError {
                line: index + 1,
                content: line.to_string(),
            };

            let captures = line_pattern().captures(line).ok_or_else(invalid)?;
            // Digits-only captures can still overflow u64.
            let left = captures["left"].parse().map_err(|_| invalid())?;
            let right = captures["right"].parse().map_err(|_| invalid())?;
            lists.add(left, right);
        }

        Ok(lists)
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Sum of pairwise distances after sorting both lists. Saturates at
    /// `u64::MAX`.
    pub fn total_distance(&self) -> u64 {
        let mut left = self.left.clone();
        let mut right = self.right.clone();
        left.sort_unstable();
        right.sort_unstable();

        left.iter()
            .zip(&right)
            .map(|(l, r)| l.abs_diff(*r))
            .fold(0, u64::saturating_add)
    }

    /// Sum of each left value times its number of occurrences on the right.
    /// Saturates at `u64::MAX`.
    pub fn similarity_score(&self) -> u64 {
        let mut counts: HashMap<u64, u64> = HashMap::new();
        for value in &self.right {
            *counts.entry(*value).or_default() += 1;
        }

        self.left
            .iter()
            .map(|value| value.saturating_mul(counts.get(value).copied().unwrap_or(0)))
            .fold(0, u64::saturating_add)
    }

    pub fn scores(&self) -> ListScores {
        ListScores {
            pairs: self.len(),
            distance: self.total_distance(),
            similarity: self.similarity_score(),
        }
    }
}
