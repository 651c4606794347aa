//! Per-item timeline: column entry dates and blocked-time accounting.
//!
//! [`IssueTimeline::process_events`] runs the single forward pass over an
//! item's ordered events, then the gap-fill pass that assigns dates to
//! columns that never received an explicit transition.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::board::{BoardColumns, Column};
use crate::event::{EventKind, IssueEvent};
use crate::label::{self, Classification, IssueLabel};
use crate::model::Issue;

/// A column paired with the instant the item entered it (`None` = unset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDate {
    pub column: Column,
    pub entered_at: Option<DateTime<Utc>>,
}

/// One work item's resolved pipeline timeline.
///
/// Created empty with one [`ColumnDate`] per topology column, mutated only
/// by [`process_events`](Self::process_events), read-only afterward.
#[derive(Debug, Clone)]
pub struct IssueTimeline {
    pub issue: Issue,
    pub classification: Classification,
    /// Board recorded by the item's `AddedToProject` event, if any.
    pub project_id: i64,
    pub start_index: usize,
    pub end_index: usize,
    pub column_dates: Vec<ColumnDate>,
    pub total_blocked: TimeDelta,
}

impl IssueTimeline {
    /// Create an empty timeline over a board topology.
    #[must_use]
    pub fn new(issue: Issue, columns: &BoardColumns, start_index: usize, end_index: usize) -> Self {
        let classification = label::classify(&issue.labels);
        let column_dates = columns
            .iter()
            .map(|column| ColumnDate {
                column: column.clone(),
                entered_at: None,
            })
            .collect();
        Self {
            issue,
            classification,
            project_id: 0,
            start_index,
            end_index,
            column_dates,
            total_blocked: TimeDelta::zero(),
        }
    }

    /// Entry date for the configured start column.
    #[must_use]
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.column_dates
            .get(self.start_index)
            .and_then(|cd| cd.entered_at)
    }

    /// Entry date for the configured end column.
    #[must_use]
    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.column_dates
            .get(self.end_index)
            .and_then(|cd| cd.entered_at)
    }

    /// Time between entering the start and end columns, in fractional days.
    ///
    /// Zero until both tracked dates are resolved.
    #[must_use]
    pub fn calc_days(&self) -> f64 {
        match (self.start_date(), self.end_date()) {
            (Some(start), Some(end)) => {
                #[allow(clippy::cast_precision_loss)]
                let seconds = (end - start).num_seconds() as f64;
                seconds / 86_400.0
            }
            _ => 0.0,
        }
    }

    /// True when the item spent at least one full day blocked.
    #[must_use]
    pub fn was_blocked(&self) -> bool {
        self.total_blocked >= TimeDelta::hours(24)
    }

    /// Cumulative blocked time in whole days, rounded up.
    #[must_use]
    pub fn blocked_days(&self) -> i64 {
        let hours = self.total_blocked.num_hours();
        hours / 24 + i64::from(hours % 24 > 0)
    }

    /// Run the full per-item pass: the forward event fold, then gap-fill.
    ///
    /// Events MUST be in ascending `created_at` order. An item with no
    /// events is left untouched (it contributes nothing to any report).
    pub fn process_events(&mut self, events: &[IssueEvent]) {
        if events.is_empty() {
            return;
        }
        self.apply_events(events);
        self.fill_missing_dates(events);
    }

    /// The single forward pass over one item's ordered events.
    fn apply_events(&mut self, events: &[IssueEvent]) {
        let mut blocked_at: Option<DateTime<Utc>> = None;

        for event in events {
            match event.kind {
                EventKind::AddedToProject => {
                    self.project_id = event.project_id;
                    // An item can be added directly into a column; route
                    // through the same handler as an explicit move.
                    if let Some(column) = event.column() {
                        self.record_move(column, event.previous_column(), event.created_at);
                    } else {
                        debug!(
                            number = self.issue.number,
                            "added to project without a column"
                        );
                    }
                }
                EventKind::MovedColumns => {
                    if let Some(column) = event.column() {
                        self.record_move(column, event.previous_column(), event.created_at);
                    } else {
                        debug!(number = self.issue.number, "move event without a column");
                    }
                }
                EventKind::Labeled => {
                    if event
                        .label
                        .as_deref()
                        .is_some_and(|l| IssueLabel::from_raw(l) == IssueLabel::Blocked)
                    {
                        if self.start_date().is_some() {
                            blocked_at = Some(event.created_at);
                        } else {
                            // Blocked before entering the tracked window:
                            // the interval is out of scope.
                            debug!(number = self.issue.number, "blocked before start column");
                        }
                    }
                }
                EventKind::Unlabeled => {
                    if event
                        .label
                        .as_deref()
                        .is_some_and(|l| IssueLabel::from_raw(l) == IssueLabel::Blocked)
                    {
                        match (blocked_at, self.start_date()) {
                            (Some(at), Some(start)) if at > start => {
                                self.total_blocked += event.created_at - at;
                            }
                            _ => {
                                debug!(number = self.issue.number, "unblock outside tracked window");
                            }
                        }
                        blocked_at = None;
                    }
                }
                EventKind::Assigned
                | EventKind::Unassigned
                | EventKind::Mentioned
                | EventKind::Closed
                | EventKind::Other => {}
            }
        }
    }

    /// Record a column entry, honoring the move rules:
    ///
    /// - an event naming a column not on the board is skipped, the item's
    ///   remaining events still apply;
    /// - a backward move (previous column has a higher index than the
    ///   target) keeps the already-recorded date;
    /// - a forward or lateral move always overwrites (last write wins).
    fn record_move(&mut self, column: &str, previous: Option<&str>, at: DateTime<Utc>) {
        let Some(target) = self.find_column(column) else {
            debug!(column, "event column not on board, skipping event");
            return;
        };

        if let Some(prev) = previous.and_then(|name| self.find_column(name))
            && prev > target
        {
            debug!(
                column,
                previous, "backward move, keeping existing column date"
            );
            return;
        }

        self.column_dates[target].entered_at = Some(at);
    }

    /// Case-insensitive column index lookup over this timeline's columns.
    fn find_column(&self, name: &str) -> Option<usize> {
        self.column_dates
            .iter()
            .position(|cd| cd.column.name.eq_ignore_ascii_case(name))
    }

    /// Assign dates to tracked columns that never saw a transition event.
    ///
    /// Walks from the last index to the first: the end column inherits the
    /// final event's date (the item presumably still sits there), an
    /// interior column inherits the date already resolved for the next
    /// column, and the start column inherits the first event's date.
    fn fill_missing_dates(&mut self, events: &[IssueEvent]) {
        let (Some(first), Some(last)) = (events.first(), events.last()) else {
            return;
        };

        for idx in (0..self.column_dates.len()).rev() {
            if self.column_dates[idx].entered_at.is_some() {
                continue;
            }
            if idx == self.end_index {
                self.column_dates[idx].entered_at = Some(last.created_at);
            } else if idx > self.start_index && idx < self.end_index {
                self.column_dates[idx].entered_at = self.column_dates[idx + 1].entered_at;
            } else if idx == self.start_index {
                self.column_dates[idx].entered_at = Some(first.created_at);
            }
        }
    }
}
