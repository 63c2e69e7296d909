//! Materialized table cells.

use std::rc::Rc;

use crate::spec::{ColumnConfiguration, ColumnId};
use crate::width::Width;

/// Shared handle to a cell.
///
/// Snapshots and the engine's live sequence share cells, so clearing the
/// dirty flag through a snapshot is visible to the engine too.
pub type CellRef = Rc<Cell>;

/// Read-only view of the flat cell sequence.
pub type CellSnapshot = Rc<[CellRef]>;

/// One (row, column) pair currently materialized.
#[derive(Debug, Clone)]
pub struct Cell {
    /// `"{row}-{column}"`; recomputed whenever the row moves.
    pub cell_id: String,
    /// Column that produced this cell.
    pub column: ColumnId,
    /// Field the column reads.
    pub field: String,
    pub sticky_left: bool,
    pub sticky_right: bool,
    /// Formatted value.
    pub value: String,
    pub width: Option<Width>,
    dirty: std::cell::Cell<bool>,
}

impl Cell {
    pub(crate) fn new<T>(
        row_index: usize,
        column_index: usize,
        column: &ColumnConfiguration<T>,
        value: String,
    ) -> Self {
        Self {
            cell_id: cell_id(row_index, column_index),
            column: column.id(),
            field: column.field().to_string(),
            sticky_left: column.sticky_left(),
            sticky_right: column.sticky_right(),
            value,
            width: column.width(),
            dirty: std::cell::Cell::new(false),
        }
    }

    /// Copy of this cell moved to `row_index`, marked dirty.
    pub(crate) fn relocated(&self, row_index: usize, column_index: usize) -> Self {
        let mut cell = self.clone();
        cell.cell_id = cell_id(row_index, column_index);
        cell.dirty.set(true);
        cell
    }

    /// Whether the cell changed since the last [`track_key`](Self::track_key).
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Identity for the renderer's own diffing: `"{cell_id}-{dirty}"`.
    ///
    /// Reading it clears the dirty flag.
    pub fn track_key(&self) -> String {
        let key = format!("{}-{}", self.cell_id, self.dirty.get());
        self.dirty.set(false);
        key
    }
}

pub(crate) fn cell_id(row_index: usize, column_index: usize) -> String {
    format!("{row_index}-{column_index}")
}
