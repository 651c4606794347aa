//! The seam to the source system.
//!
//! Everything network-shaped (authentication, pagination, rate limiting)
//! lives behind [`BoardSource`]; the engine only ever sees already-fetched,
//! already-deserialized board data. Fetch failures are fatal for the run
//! and propagate without retry.

use anyhow::Result;

use crate::board::BoardColumns;
use crate::event::IssueEvent;
use crate::model::Issue;
use crate::window::ReportWindow;

/// Board metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub id: i64,
    pub name: String,
}

/// Supplies board data to the run orchestration.
///
/// Implementations must return each item's events in ascending
/// `created_at` order; the engine does not re-sort.
pub trait BoardSource {
    /// Board metadata for a board id.
    fn board(&self, board_id: i64) -> Result<Board>;

    /// The board's ordered column topology.
    fn columns(&self, board_id: i64) -> Result<BoardColumns>;

    /// Items updated within the reporting window.
    fn issues(&self, board_id: i64, window: ReportWindow) -> Result<Vec<Issue>>;

    /// One item's ordered lifecycle events.
    fn issue_events(&self, issue: &Issue) -> Result<Vec<IssueEvent>>;
}
