//! `dampener explain`: verdict and trace for a single report.

use anyhow::Result;
use serde::Serialize;

use dampener::config::Config;
use dampener::report::Report;
use dampener::safety::{Direction, SafetyEvaluator, TraceBuffer, TraceEvent};
use dampener::ui::{self, colors};

use super::ui::Output;

/// Outcome of one direction at one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionVerdict {
    pub direction: Direction,
    pub safe: bool,
    /// Levels the dampener dropped, outermost removal first
    pub removed_levels: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub budget: u32,
    pub safe: bool,
    pub directions: Vec<DirectionVerdict>,
}

/// Evaluate each direction separately so the verdicts can be shown side by side.
pub fn explain(evaluator: &SafetyEvaluator, levels: &[i64], budget: u32) -> Explanation {
    let directions: Vec<DirectionVerdict> = Direction::ALL
        .iter()
        .map(|&direction| {
            let mut trace = TraceBuffer::new();
            let safe = evaluator.is_safe_in(direction, levels, budget, &mut trace);
            // Removals are recorded innermost first.
            let removed_levels = trace
                .events()
                .iter()
                .rev()
                .filter_map(|event| match event {
                    TraceEvent::RemovalPermitted {
                        levels, removed, ..
                    } => levels.get(*removed).copied(),
                    TraceEvent::DirectionPassed { .. } => None,
                })
                .collect();

            DirectionVerdict {
                direction,
                safe,
                removed_levels,
            }
        })
        .collect();

    Explanation {
        budget,
        safe: directions.iter().any(|verdict| verdict.safe),
        directions,
    }
}

pub fn cmd_explain(
    config: &Config,
    output: &Output,
    levels: Vec<i64>,
    budget: Option<u32>,
) -> Result<()> {
    let report = Report::new(levels);
    let evaluator = config.evaluator();
    let max_budget = budget
        .or_else(|| config.reports.budgets.iter().copied().max())
        .unwrap_or(1);

    output.step(&format!("Explaining {}", colors::levels(&report.to_string())));

    for budget in 0..=max_budget {
        let explanation = explain(&evaluator, report.levels(), budget);
        output.result(&render(&explanation), &serde_json::to_value(&explanation)?);
    }

    Ok(())
}

fn render(explanation: &Explanation) -> String {
    let mut lines = vec![format!(
        "{} budget {}: {}",
        ui::verdict_icon(explanation.safe),
        explanation.budget,
        ui::verdict(explanation.safe)
    )];

    for verdict in &explanation.directions {
        let detail = if !verdict.safe {
            String::new()
        } else if verdict.removed_levels.is_empty() {
            colors::dim(" (no removal)").to_string()
        } else {
            let removed: Vec<String> = verdict
                .removed_levels
                .iter()
                .map(|level| level.to_string())
                .collect();
            colors::dim(&format!(" (removed {})", removed.join(", "))).to_string()
        };
        lines.push(format!(
            "    {}: {}{}",
            verdict.direction,
            ui::verdict(verdict.safe),
            detail
        ));
    }

    lines.join("\n")
}
