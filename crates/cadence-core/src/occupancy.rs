//! Per-day column occupancy over a reporting window.
//!
//! The [`OccupancyAggregator`] folds one item's events at a time into a
//! day-by-day record of which column the item occupied, then merges the
//! item's contribution additively into its [`OccupancyMatrix`]. The matrix
//! is owned by the aggregator for the duration of a run; callers that fetch
//! items concurrently must serialize calls to
//! [`add_issue`](OccupancyAggregator::add_issue).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::event::{EventKind, IssueEvent};
use crate::window::ReportWindow;

/// Day → column → number of items occupying that column on that day.
///
/// Pre-seeded with every day of the reporting window; grows only by
/// addition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMatrix {
    days: BTreeMap<NaiveDate, BTreeMap<String, u32>>,
}

impl OccupancyMatrix {
    /// An empty matrix with one entry per day of the window.
    #[must_use]
    pub fn new(window: ReportWindow) -> Self {
        let days = window.days().map(|day| (day, BTreeMap::new())).collect();
        Self { days }
    }

    /// The count for a day/column cell; absent cells read as zero.
    #[must_use]
    pub fn count(&self, day: NaiveDate, column: &str) -> u32 {
        self.days
            .get(&day)
            .and_then(|cols| cols.get(column))
            .copied()
            .unwrap_or(0)
    }

    fn increment(&mut self, day: NaiveDate, column: &str) {
        *self
            .days
            .entry(day)
            .or_default()
            .entry(column.to_owned())
            .or_insert(0) += 1;
    }
}

/// Folds many items' event streams into one shared [`OccupancyMatrix`].
#[derive(Debug, Clone)]
pub struct OccupancyAggregator {
    board_id: i64,
    end_column: String,
    window: ReportWindow,
    matrix: OccupancyMatrix,
}

impl OccupancyAggregator {
    #[must_use]
    pub fn new(board_id: i64, end_column: impl Into<String>, window: ReportWindow) -> Self {
        Self {
            board_id,
            end_column: end_column.into(),
            window,
            matrix: OccupancyMatrix::new(window),
        }
    }

    /// The matrix accumulated so far.
    #[must_use]
    pub fn matrix(&self) -> &OccupancyMatrix {
        &self.matrix
    }

    /// Consume the aggregator, yielding the finished matrix.
    #[must_use]
    pub fn into_matrix(self) -> OccupancyMatrix {
        self.matrix
    }

    /// Fold one item's ordered events and merge its contribution.
    ///
    /// The item's daily tallies only count when its `AddedToProject` event
    /// named this aggregator's board; an item can sit on several boards and
    /// must not inflate the others' occupancy. Items with no date entries
    /// contribute nothing.
    pub fn add_issue(&mut self, events: &[IssueEvent]) {
        let mut should_include = false;
        let mut day_columns: BTreeMap<NaiveDate, String> = BTreeMap::new();
        let mut prev: Option<(NaiveDate, String)> = None;

        for event in events {
            match event.kind {
                EventKind::AddedToProject => {
                    should_include = event.project_id == self.board_id;
                    let Some(column) = event.column() else {
                        debug!("added to project without a column");
                        continue;
                    };
                    Self::record_day(&mut day_columns, &mut prev, column, event);
                }
                EventKind::MovedColumns => {
                    let Some(column) = event.column() else {
                        debug!("move event without a column");
                        continue;
                    };
                    Self::record_day(&mut day_columns, &mut prev, column, event);
                }
                _ => {}
            }
        }

        // An item still in flight keeps occupying its last known column
        // through the end of the reporting window.
        if let Some((prev_day, prev_column)) = prev
            && !prev_column.eq_ignore_ascii_case(&self.end_column)
        {
            let mut fill = prev_day.succ_opt();
            while let Some(day) = fill.filter(|d| *d < self.window.end) {
                day_columns.insert(day, prev_column.clone());
                fill = day.succ_opt();
            }
        }

        if day_columns.is_empty() || !should_include {
            return;
        }
        for (day, column) in &day_columns {
            self.matrix.increment(*day, column);
        }
    }

    /// Record a column entry day, backfilling the days the item sat in the
    /// previous column. The day's last move wins.
    fn record_day(
        day_columns: &mut BTreeMap<NaiveDate, String>,
        prev: &mut Option<(NaiveDate, String)>,
        column: &str,
        event: &IssueEvent,
    ) {
        let event_day = event.created_at.date_naive();

        if let Some((prev_day, prev_column)) = prev.take() {
            let mut fill = prev_day.succ_opt();
            while let Some(day) = fill.filter(|d| *d < event_day) {
                day_columns.insert(day, prev_column.clone());
                fill = day.succ_opt();
            }
        }

        day_columns.insert(event_day, column.to_owned());
        *prev = Some((event_day, column.to_owned()));
    }
}
