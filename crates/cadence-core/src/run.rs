//! Run orchestration: resolve a board, drive the engine over its items,
//! and produce renderable reports.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::board::BoardColumns;
use crate::error::EngineError;
use crate::occupancy::OccupancyAggregator;
use crate::report::{self, RunReport};
use crate::source::{Board, BoardSource};
use crate::timeline::IssueTimeline;
use crate::window::ReportWindow;

/// The reports this crate can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Per-item stage-entry dates and blocked time.
    Issues,
    /// Per-day column occupancy.
    Columns,
}

impl Metric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::Columns => "columns",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issues" => Ok(Self::Issues),
            "columns" => Ok(Self::Columns),
            _ => Err(EngineError::UnknownMetric { name: s.to_owned() }),
        }
    }
}

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub board_id: i64,
    /// Configured start column name; index 0 when unset or unmatched.
    pub start_column: Option<String>,
    /// Configured end column name; the last column when unset or unmatched.
    pub end_column: Option<String>,
    pub window: ReportWindow,
}

/// A board with its topology and resolved tracked-column indexes.
#[derive(Debug, Clone)]
pub struct ResolvedBoard {
    pub board: Board,
    pub columns: BoardColumns,
    pub start_index: usize,
    pub end_index: usize,
}

/// Fetch a board's topology and resolve the tracked column range.
///
/// An empty topology is fatal for the whole run: no indexes can be
/// resolved and no partial output is produced. An end column that
/// resolves to index 0 falls back to the last column, matching the
/// start-of-pipeline default.
pub fn resolve_board(source: &dyn BoardSource, config: &RunConfig) -> Result<ResolvedBoard> {
    let board = source
        .board(config.board_id)
        .with_context(|| format!("fetching board {}", config.board_id))?;
    let columns = source
        .columns(config.board_id)
        .with_context(|| format!("fetching columns for board {}", config.board_id))?;
    if columns.is_empty() {
        return Err(EngineError::EmptyBoardColumns.into());
    }

    let start_index = config
        .start_column
        .as_deref()
        .and_then(|name| columns.find(name))
        .map_or(0, |column| column.index);
    let mut end_index = config
        .end_column
        .as_deref()
        .and_then(|name| columns.find(name))
        .map_or(0, |column| column.index);
    if end_index == 0 {
        end_index = columns.len() - 1;
    }
    debug!(
        board = %board.name,
        start_index,
        end_index,
        "resolved tracked columns"
    );

    Ok(ResolvedBoard {
        board,
        columns,
        start_index,
        end_index,
    })
}

/// Run the per-item metric: one row per item that progressed through the
/// tracked range within the reporting window.
pub fn run_issues(source: &dyn BoardSource, config: &RunConfig) -> Result<RunReport> {
    let resolved = resolve_board(source, config)?;
    let issues = source.issues(config.board_id, config.window)?;
    info!(count = issues.len(), board = %resolved.board.name, "processing issues");

    let mut timelines = Vec::with_capacity(issues.len());
    for issue in issues {
        let events = source
            .issue_events(&issue)
            .with_context(|| format!("fetching events for {}/{}", issue.repo_name, issue.number))?;
        let mut timeline = IssueTimeline::new(
            issue,
            &resolved.columns,
            resolved.start_index,
            resolved.end_index,
        );
        timeline.process_events(&events);
        timelines.push(timeline);
    }

    let rows = timelines
        .iter()
        .filter(|timeline| include_issue(timeline, config))
        .map(report::issue_row)
        .collect();

    Ok(RunReport {
        name: report::run_name(&resolved.board.name, Metric::Issues.as_str(), config.window),
        headers: report::issue_headers(&resolved.columns, resolved.start_index, resolved.end_index),
        rows,
    })
}

/// Run the occupancy metric: one row per calendar day in the window.
pub fn run_columns(source: &dyn BoardSource, config: &RunConfig) -> Result<RunReport> {
    let resolved = resolve_board(source, config)?;
    let end_column = resolved
        .columns
        .get(resolved.end_index)
        .map(|column| column.name.clone())
        .unwrap_or_default();

    let mut aggregator = OccupancyAggregator::new(config.board_id, end_column, config.window);
    let issues = source.issues(config.board_id, config.window)?;
    info!(count = issues.len(), board = %resolved.board.name, "aggregating occupancy");
    for issue in &issues {
        let events = source
            .issue_events(issue)
            .with_context(|| format!("fetching events for {}/{}", issue.repo_name, issue.number))?;
        aggregator.add_issue(&events);
    }

    let rows = report::occupancy_rows(
        &aggregator.into_matrix(),
        &resolved.columns,
        resolved.start_index,
        resolved.end_index,
        config.window,
    );

    Ok(RunReport {
        name: report::run_name(&resolved.board.name, Metric::Columns.as_str(), config.window),
        headers: report::occupancy_headers(
            &resolved.columns,
            resolved.start_index,
            resolved.end_index,
        ),
        rows,
    })
}

/// The per-item row filter: the item belongs to this board, finished the
/// tracked range inside the window, and progressed for longer than the
/// noise threshold.
fn include_issue(timeline: &IssueTimeline, config: &RunConfig) -> bool {
    timeline.project_id == config.board_id
        && timeline
            .end_date()
            .is_some_and(|at| config.window.contains(at))
        && timeline.calc_days() > 0.01
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, IssueEvent};
    use crate::model::Issue;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn metric_parses_known_names() {
        assert_eq!("issues".parse::<Metric>(), Ok(Metric::Issues));
        assert_eq!("columns".parse::<Metric>(), Ok(Metric::Columns));
        assert_eq!(Metric::Issues.to_string(), "issues");
    }

    #[test]
    fn metric_rejects_unknown_names() {
        let err = "velocity".parse::<Metric>().expect_err("must not parse");
        assert_eq!(
            err,
            EngineError::UnknownMetric {
                name: "velocity".into()
            }
        );
    }

    struct StubSource {
        columns: Vec<(&'static str, i64)>,
    }

    impl BoardSource for StubSource {
        fn board(&self, board_id: i64) -> Result<Board> {
            Ok(Board {
                id: board_id,
                name: "Test Board".into(),
            })
        }

        fn columns(&self, _board_id: i64) -> Result<BoardColumns> {
            Ok(BoardColumns::new(self.columns.clone()))
        }

        fn issues(&self, _board_id: i64, _window: ReportWindow) -> Result<Vec<Issue>> {
            Ok(vec![])
        }

        fn issue_events(&self, _issue: &Issue) -> Result<Vec<IssueEvent>> {
            Ok(vec![])
        }
    }

    fn config(start: Option<&str>, end: Option<&str>) -> RunConfig {
        RunConfig {
            board_id: 1,
            start_column: start.map(Into::into),
            end_column: end.map(Into::into),
            window: ReportWindow::new(
                NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"),
                NaiveDate::from_ymd_opt(2020, 2, 1).expect("valid date"),
            ),
        }
    }

    fn stub() -> StubSource {
        StubSource {
            columns: vec![("Backlog", 1), ("In Progress", 2), ("Review", 3), ("Done", 4)],
        }
    }

    #[test]
    fn resolve_board_defaults_to_full_range() {
        let resolved = resolve_board(&stub(), &config(None, None)).expect("resolves");
        assert_eq!(resolved.start_index, 0);
        assert_eq!(resolved.end_index, 3);
    }

    #[test]
    fn resolve_board_matches_configured_columns() {
        let resolved =
            resolve_board(&stub(), &config(Some("in progress"), Some("Review"))).expect("resolves");
        assert_eq!(resolved.start_index, 1);
        assert_eq!(resolved.end_index, 2);
    }

    #[test]
    fn resolve_board_unmatched_end_falls_back_to_last() {
        let resolved =
            resolve_board(&stub(), &config(None, Some("Shipped"))).expect("resolves");
        assert_eq!(resolved.end_index, 3);
    }

    #[test]
    fn resolve_board_end_at_index_zero_falls_back_to_last() {
        // An end column sitting at index 0 is indistinguishable from the
        // unset default and falls back to the last column.
        let resolved =
            resolve_board(&stub(), &config(None, Some("Backlog"))).expect("resolves");
        assert_eq!(resolved.end_index, 3);
    }

    #[test]
    fn resolve_board_empty_topology_is_fatal() {
        let source = StubSource { columns: vec![] };
        let err = resolve_board(&source, &config(None, None)).expect_err("must fail");
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::EmptyBoardColumns)
        );
    }

    #[test]
    fn include_issue_gates_on_board_window_and_noise() {
        let columns = BoardColumns::new([("To Do", 1), ("Done", 2)]);
        let event = |d, kind, column: &str| IssueEvent {
            kind,
            created_at: Utc
                .with_ymd_and_hms(2020, 1, d, 12, 0, 0)
                .single()
                .expect("valid instant"),
            project_id: 1,
            column_name: Some(column.into()),
            ..Default::default()
        };
        let cfg = config(None, None);

        let mut timeline = IssueTimeline::new(Issue::default(), &columns, 0, 1);
        timeline.process_events(&[
            event(2, EventKind::AddedToProject, "To Do"),
            event(6, EventKind::MovedColumns, "Done"),
        ]);
        assert!(include_issue(&timeline, &cfg));

        // Wrong board.
        let mut other = timeline.clone();
        other.project_id = 99;
        assert!(!include_issue(&other, &cfg));

        // Never meaningfully progressed.
        let mut flat = IssueTimeline::new(Issue::default(), &columns, 0, 1);
        flat.process_events(&[event(2, EventKind::AddedToProject, "To Do")]);
        assert!(!include_issue(&flat, &cfg));
    }
}
