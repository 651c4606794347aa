//! File-backed board snapshot implementing [`BoardSource`].
//!
//! A snapshot is a JSON document of already-fetched board data: board
//! metadata with columns in topology order, and per-item event lists.
//! It stands in for the remote API client, so the tool works end to end
//! on exported data with no network code.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use cadence_core::board::BoardColumns;
use cadence_core::event::IssueEvent;
use cadence_core::model::Issue;
use cadence_core::source::{Board, BoardSource};
use cadence_core::window::ReportWindow;

/// An exported board document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    boards: Vec<SnapshotBoard>,
    #[serde(default)]
    issues: Vec<SnapshotIssue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotBoard {
    id: i64,
    name: String,
    #[serde(default)]
    columns: Vec<SnapshotColumn>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotColumn {
    name: String,
    id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotIssue {
    #[serde(flatten)]
    issue: Issue,
    #[serde(default)]
    events: Vec<IssueEvent>,
}

impl Snapshot {
    /// Load a snapshot document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot: {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing snapshot: {}", path.display()))
    }

    fn find_board(&self, board_id: i64) -> Result<&SnapshotBoard> {
        match self.boards.iter().find(|board| board.id == board_id) {
            Some(board) => Ok(board),
            None => bail!("board {board_id} not present in snapshot"),
        }
    }
}

impl BoardSource for Snapshot {
    fn board(&self, board_id: i64) -> Result<Board> {
        let board = self.find_board(board_id)?;
        Ok(Board {
            id: board.id,
            name: board.name.clone(),
        })
    }

    fn columns(&self, board_id: i64) -> Result<BoardColumns> {
        let board = self.find_board(board_id)?;
        Ok(BoardColumns::new(
            board.columns.iter().map(|col| (col.name.clone(), col.id)),
        ))
    }

    fn issues(&self, _board_id: i64, _window: ReportWindow) -> Result<Vec<Issue>> {
        // Snapshots are exported pre-filtered for their reporting window.
        Ok(self.issues.iter().map(|si| si.issue.clone()).collect())
    }

    fn issue_events(&self, issue: &Issue) -> Result<Vec<IssueEvent>> {
        let Some(found) = self.issues.iter().find(|si| {
            si.issue.owner == issue.owner
                && si.issue.repo_name == issue.repo_name
                && si.issue.number == issue.number
        }) else {
            return Ok(vec![]);
        };
        // The engine requires ascending order; exports are not trusted to
        // guarantee it.
        let mut events = found.events.clone();
        events.sort_by_key(|event| event.created_at);
        Ok(events)
    }
}
