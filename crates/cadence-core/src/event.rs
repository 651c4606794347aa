//! Work-item lifecycle event model and kind normalization.
//!
//! Raw event type strings from the source system are normalized into
//! [`EventKind`] with a total, case-insensitive mapping: anything outside
//! the known set becomes [`EventKind::Other`] (logged, never an error).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// The event kinds the engine recognizes.
///
/// The string representation is the source system's SCREAMING_SNAKE
/// spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Card was added to a project board, possibly directly into a column.
    AddedToProject,
    /// Card moved between board columns.
    MovedColumns,
    /// A label was applied.
    Labeled,
    /// A label was removed.
    Unlabeled,
    /// Someone was assigned.
    Assigned,
    /// Someone was unassigned.
    Unassigned,
    /// The item was mentioned.
    Mentioned,
    /// The item was closed.
    Closed,
    /// Any event type outside the known set.
    Other,
}

impl EventKind {
    /// All known kinds, in catalog order.
    pub const ALL: [Self; 9] = [
        Self::AddedToProject,
        Self::MovedColumns,
        Self::Labeled,
        Self::Unlabeled,
        Self::Assigned,
        Self::Unassigned,
        Self::Mentioned,
        Self::Closed,
        Self::Other,
    ];

    /// Canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddedToProject => "ADDED_TO_PROJECT",
            Self::MovedColumns => "MOVED_COLUMNS_IN_PROJECT",
            Self::Labeled => "LABELED",
            Self::Unlabeled => "UNLABELED",
            Self::Assigned => "ASSIGNED",
            Self::Unassigned => "UNASSIGNED",
            Self::Mentioned => "MENTIONED",
            Self::Closed => "CLOSED",
            Self::Other => "OTHER",
        }
    }

    /// Normalize a raw event type string.
    ///
    /// Matching is case-insensitive. Unknown strings map to
    /// [`EventKind::Other`]; this function always returns a value.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "ADDED_TO_PROJECT" => Self::AddedToProject,
            "MOVED_COLUMNS_IN_PROJECT" => Self::MovedColumns,
            "LABELED" => Self::Labeled,
            "UNLABELED" => Self::Unlabeled,
            "ASSIGNED" => Self::Assigned,
            "UNASSIGNED" => Self::Unassigned,
            "MENTIONED" => Self::Mentioned,
            "CLOSED" => Self::Closed,
            "OTHER" => Self::Other,
            _ => {
                debug!(raw, "unrecognized event type");
                Self::Other
            }
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serde: canonical string out, normalizing (total) mapping in.
impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&s))
    }
}

/// One normalized lifecycle event for a work item.
///
/// Immutable once constructed. Events for a single item MUST be supplied
/// in ascending `created_at` order; the engine does not re-sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueEvent {
    /// Normalized event kind.
    pub kind: EventKind,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
    /// Board the event refers to (meaningful for `AddedToProject`).
    pub project_id: i64,
    /// Target column for add/move events.
    pub column_name: Option<String>,
    /// Column the card left, when the source recorded one.
    pub previous_column_name: Option<String>,
    /// Label for `Labeled`/`Unlabeled` events.
    pub label: Option<String>,
    /// Acting user, when the source recorded one.
    pub actor: Option<String>,
}

impl Default for IssueEvent {
    fn default() -> Self {
        Self {
            kind: EventKind::Other,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            project_id: 0,
            column_name: None,
            previous_column_name: None,
            label: None,
            actor: None,
        }
    }
}

impl IssueEvent {
    /// The target column name, treating an empty string as absent.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        self.column_name.as_deref().filter(|name| !name.is_empty())
    }

    /// The previous column name, treating an empty string as absent.
    #[must_use]
    pub fn previous_column(&self) -> Option<&str> {
        self.previous_column_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}
