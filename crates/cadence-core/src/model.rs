//! Work-item identity as fetched from the source system.

use serde::{Deserialize, Serialize};

/// A work item (card) tracked on a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    /// Organization or user owning the repository.
    pub owner: String,
    /// Repository the item belongs to.
    pub repo_name: String,
    /// Item number within the repository.
    pub number: u64,
    /// Item title.
    pub title: String,
    /// Raw label names currently on the item.
    pub labels: Vec<String>,
}
