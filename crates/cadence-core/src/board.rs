//! Board column topology.

use serde::{Deserialize, Serialize};

/// One pipeline stage on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within a topology.
    pub name: String,
    /// Source-system column id.
    pub id: i64,
    /// 0-based position in the pipeline.
    pub index: usize,
}

/// The ordered column topology for one board.
///
/// Immutable for the duration of a run. Lookup by name is a
/// case-insensitive linear scan; topologies are tens of columns at most.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardColumns {
    columns: Vec<Column>,
}

impl BoardColumns {
    /// Build a topology from ordered `(name, id)` pairs, assigning indexes
    /// by position.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(index, (name, id))| Column {
                name: name.into(),
                id,
                index,
            })
            .collect();
        Self { columns }
    }

    /// True when the board has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Column at a topology index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|col| col.name.eq_ignore_ascii_case(name))
    }

    /// Iterate columns in topology order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Column names in topology order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a BoardColumns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
