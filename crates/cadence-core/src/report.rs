//! Row generation for the metrics emitter.
//!
//! Both runners produce a [`RunReport`]: a flat set of string rows plus the
//! headers that describe them. Rendering (CSV, JSON, a GUI table) is the
//! consumer's job.

use serde::Serialize;

use crate::board::BoardColumns;
use crate::occupancy::OccupancyMatrix;
use crate::timeline::IssueTimeline;
use crate::window::ReportWindow;

/// Per-item entry dates render as `MM/DD/YY`.
const COLUMN_DATE_FORMAT: &str = "%m/%d/%y";

/// Occupancy day keys render as `YYYY-MM-DD`.
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// One finished report: headers plus data rows, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Suggested file name for this run (`<Project>_<metric>_<YYYY-MM>.csv`).
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Suggested output file name for a run.
#[must_use]
pub fn run_name(project_name: &str, metric: &str, window: ReportWindow) -> String {
    use chrono::Datelike;
    format!(
        "{}_{}_{}-{:02}.csv",
        project_name.replace(' ', "_"),
        metric,
        window.start.year(),
        window.start.month(),
    )
}

/// Headers for the per-item report, covering the tracked column range.
#[must_use]
pub fn issue_headers(columns: &BoardColumns, start_index: usize, end_index: usize) -> Vec<String> {
    let mut headers = vec![
        "Card #".to_owned(),
        "Team".to_owned(),
        "Type".to_owned(),
        "Description".to_owned(),
    ];
    for index in start_index..=end_index {
        if let Some(column) = columns.get(index) {
            headers.push(column.name.clone());
        }
    }
    headers.extend([
        "Development Days".to_owned(),
        "Feature?".to_owned(),
        "Blocked?".to_owned(),
        "Blocked Days".to_owned(),
    ]);
    headers
}

/// One per-item row, tracked columns only. Unset dates render empty.
#[must_use]
pub fn issue_row(timeline: &IssueTimeline) -> Vec<String> {
    let mut row = vec![
        timeline.issue.number.to_string(),
        timeline.issue.repo_name.clone(),
        timeline.classification.type_name.to_owned(),
        timeline.issue.title.clone(),
    ];
    for index in timeline.start_index..=timeline.end_index {
        let date = timeline
            .column_dates
            .get(index)
            .and_then(|cd| cd.entered_at)
            .map(|at| at.format(COLUMN_DATE_FORMAT).to_string())
            .unwrap_or_default();
        row.push(date);
    }
    row.push(fmt_days(timeline.calc_days()));
    row.push(timeline.classification.is_feature.to_string());
    row.push(timeline.was_blocked().to_string());
    row.push(timeline.blocked_days().to_string());
    row
}

/// Headers for the occupancy report: `Day` plus the tracked columns.
#[must_use]
pub fn occupancy_headers(
    columns: &BoardColumns,
    start_index: usize,
    end_index: usize,
) -> Vec<String> {
    let mut headers = vec!["Day".to_owned()];
    for index in start_index..=end_index {
        if let Some(column) = columns.get(index) {
            headers.push(column.name.clone());
        }
    }
    headers
}

/// One row per calendar day in the window; absent cells render `0`.
#[must_use]
pub fn occupancy_rows(
    matrix: &OccupancyMatrix,
    columns: &BoardColumns,
    start_index: usize,
    end_index: usize,
    window: ReportWindow,
) -> Vec<Vec<String>> {
    window
        .days()
        .map(|day| {
            let mut row = vec![day.format(DAY_KEY_FORMAT).to_string()];
            for index in start_index..=end_index {
                let count = columns
                    .get(index)
                    .map_or(0, |column| matrix.count(day, &column.name));
                row.push(count.to_string());
            }
            row
        })
        .collect()
}

/// Fractional days with one decimal place.
#[must_use]
pub fn fmt_days(days: f64) -> String {
    format!("{days:.1}")
}
