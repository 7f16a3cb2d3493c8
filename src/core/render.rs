//! Pure view-model rendering.
//!
//! Rows are rebuilt in full from the roster on every call, so the output
//! always mirrors roster order exactly.

use crate::core::evaluator::{self, Evaluator};
use crate::core::roster::Roster;
use crate::domain::model::{Entry, Labels, RowView, SummaryView, Threshold};
use crate::utils::error::GradeError;

const SCIENTIFIC_ABOVE: f64 = 1e15;

/// Shortest decimal form: `8`, `7.5`, `6.25`. Huge magnitudes switch to
/// scientific notation (`1e308`) so table columns stay readable.
pub fn format_grade(grade: f64) -> String {
    if grade.abs() >= SCIENTIFIC_ABOVE {
        format!("{:e}", grade)
    } else {
        format!("{}", grade)
    }
}

/// Always two decimals: `7.00`, or `1.00e308` for huge magnitudes.
pub fn format_average(average: f64) -> String {
    if average.abs() >= SCIENTIFIC_ABOVE {
        format!("{:.2e}", average)
    } else {
        format!("{:.2}", average)
    }
}

pub fn render_row(entry: &Entry, threshold: Threshold, labels: &Labels) -> RowView {
    let verdict = evaluator::classify(entry.grade, threshold);
    RowView {
        name: entry.name.clone(),
        grade: entry.grade,
        grade_display: format_grade(entry.grade),
        verdict,
        label: labels.for_verdict(verdict).to_string(),
    }
}

pub fn render_rows(entries: &[Entry], threshold: Threshold, labels: &Labels) -> Vec<RowView> {
    entries
        .iter()
        .map(|entry| render_row(entry, threshold, labels))
        .collect()
}

pub fn render_summary(roster: &Roster, threshold: Threshold, labels: &Labels) -> SummaryView {
    match Evaluator::new(threshold).summarize(roster) {
        Ok(summary) => SummaryView::Average {
            average: summary.average,
            average_display: format_average(summary.average),
            verdict: summary.verdict,
            label: labels.for_verdict(summary.verdict).to_string(),
            count: summary.count,
        },
        Err(GradeError::EmptyRoster) => SummaryView::NoData,
        Err(e) => {
            // summarize 只會回傳 EmptyRoster
            tracing::error!("Unexpected summary error: {}", e);
            SummaryView::NoData
        }
    }
}

/// Plain-text table for the console.
pub fn render_table(rows: &[RowView]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once("Activity".len()))
        .max()
        .unwrap_or(0);
    let grade_width = rows
        .iter()
        .map(|r| r.grade_display.len())
        .chain(std::iter::once("Grade".len()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!(
        "{:<name_width$}  {:>grade_width$}  Status",
        "Activity", "Grade"
    )];
    for row in rows {
        lines.push(format!(
            "{:<name_width$}  {:>grade_width$}  {}",
            row.name, row.grade_display, row.label
        ));
    }
    lines.join("\n")
}

pub fn render_summary_line(summary: &SummaryView) -> String {
    match summary {
        SummaryView::NoData => "Final average: no data".to_string(),
        SummaryView::Average {
            average_display,
            label,
            ..
        } => format!("Final average: {} ({})", average_display, label),
    }
}
