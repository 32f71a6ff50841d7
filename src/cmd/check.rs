//! `dampener check`: count safe reports in a file.

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use dampener::config::Config;
use dampener::reports::{ParsePolicy, Reports};
use dampener::safety::{SafetyEvaluator, TraceBuffer, TraceEvent};
use dampener::ui::colors;

use super::ui::Output;

pub fn cmd_check(
    config: &Config,
    output: &Output,
    file: Option<&Path>,
    skip_invalid: bool,
    extra_budgets: &[u32],
) -> Result<()> {
    let path = super::input_path(file, config.reports_input());
    let policy = if skip_invalid {
        ParsePolicy::Skip
    } else {
        config.reports.on_parse_error
    };

    output.step(&format!("Reading reports from {}", path.display()));
    let reports = Reports::load(&path, policy)?;

    for skipped in reports.skipped() {
        output.warn(&format!("Skipped line {}: {}", skipped.line, skipped.error));
    }
    output.step(&format!("Finished reading {} reports", reports.len()));

    let evaluator = config.evaluator();
    if output.is_verbose() {
        trace_dampened(&reports, &evaluator, output);
    }

    let summary = reports.summarize(&evaluator);
    let budgets = extra_budget_counts(
        &reports,
        &evaluator,
        &config.reports.budgets,
        extra_budgets,
    );

    let mut text = format!(
        "safe: {}\nsafe with dampener: {}",
        colors::count(summary.safe),
        colors::count(summary.safe_with_dampener)
    );
    for (budget, count) in &budgets {
        text.push_str(&format!(
            "\nsafe with {} removals: {}",
            budget,
            colors::count(count)
        ));
    }

    let mut value = serde_json::to_value(summary)?;
    value["budgets"] = budgets
        .iter()
        .map(|(budget, count)| (budget.to_string(), json!(count)))
        .collect::<serde_json::Map<_, _>>()
        .into();

    output.result(&text, &value);
    output.success("Check complete");

    Ok(())
}

/// Counts for every budget beyond the two the summary always carries.
///
/// Budgets from the command line replace the configured ones. Sorted by
/// budget, without duplicates.
pub fn extra_budget_counts(
    reports: &Reports,
    evaluator: &SafetyEvaluator,
    configured: &[u32],
    extra: &[u32],
) -> Vec<(u32, usize)> {
    let requested = if extra.is_empty() { configured } else { extra };
    let mut budgets: Vec<u32> = requested
        .iter()
        .copied()
        .filter(|budget| *budget > 1)
        .collect();
    budgets.sort_unstable();
    budgets.dedup();

    budgets
        .into_iter()
        .map(|budget| (budget, reports.count_safe(evaluator, budget)))
        .collect()
}

/// Emit a detail line for every report that only passes with the dampener.
fn trace_dampened(reports: &Reports, evaluator: &SafetyEvaluator, output: &Output) {
    let mut trace = TraceBuffer::new();

    for report in reports.reports() {
        if report.is_safe(evaluator, 0) {
            continue;
        }

        trace.clear();
        if !evaluator.is_safe_observed(report.levels(), 1, &mut trace) {
            continue;
        }

        for event in trace.events() {
            if let TraceEvent::RemovalPermitted {
                direction, removed, ..
            } = event
            {
                output.detail(
                    &format!(
                        "damper permitted report {} ({}, removed index {})",
                        colors::levels(&report.to_string()),
                        direction,
                        removed
                    ),
                    Some(("removed", &removed.to_string())),
                );
            }
        }
    }
}
