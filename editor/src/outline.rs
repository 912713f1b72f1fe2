//! Outline panel rows, one per created node.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow {
    pub id: RowId,
    pub label: String,
}

/// Ordered list of rows shown in the outline panel.
#[derive(Debug, Default)]
pub struct Outline {
    rows: Vec<OutlineRow>,
    next_id: u64,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row and returns its id.
    pub fn add_row(&mut self, label: impl Into<String>) -> RowId {
        self.next_id += 1;
        let id = RowId(self.next_id);
        self.rows.push(OutlineRow {
            id,
            label: label.into(),
        });
        id
    }

    /// Removes a row, returning its former index and contents.
    pub fn remove_row(&mut self, id: RowId) -> Option<(usize, OutlineRow)> {
        let index = self.rows.iter().position(|r| r.id == id)?;
        Some((index, self.rows.remove(index)))
    }

    /// Puts a removed row back at its former index.
    pub fn restore_row(&mut self, index: usize, row: OutlineRow) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
    }

    pub fn row(&self, id: RowId) -> Option<&OutlineRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn rows(&self) -> &[OutlineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
