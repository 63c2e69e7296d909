//! Immutable table configuration produced by [`TableBuilder`](crate::TableBuilder).

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::row::{RowKey, TableRow};
use crate::selection::SelectionMode;
use crate::width::Width;

/// Formats a raw field value for display.
pub type CellFormatter = Rc<dyn Fn(&Value) -> String>;

/// Sort function attached to a column: `(rows, field) -> sorted rows`.
pub type SortFn<T> = Rc<dyn Fn(&[T], &str) -> Vec<T>>;

/// Decides whether a row may be selected.
pub type SelectionFilterFn<T> = Rc<dyn Fn(&T) -> bool>;

/// Produces the expanded detail of a row.
pub type ExpansionFn<T> = Rc<dyn Fn(&T) -> T>;

/// Unique identifier of a built column configuration.
///
/// Two columns reading the same field still get distinct ids, and a rebuilt
/// configuration never reuses the ids of an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(usize);

impl ColumnId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__column_{}", self.0)
    }
}

/// Configuration of one displayed column.
pub struct ColumnConfiguration<T> {
    pub(crate) id: ColumnId,
    pub(crate) field: String,
    pub(crate) name: String,
    pub(crate) formatter: CellFormatter,
    pub(crate) sort_fn: Option<SortFn<T>>,
    pub(crate) sticky: bool,
    pub(crate) sticky_left: bool,
    pub(crate) sticky_right: bool,
    pub(crate) width: Option<Width>,
}

impl<T> ColumnConfiguration<T> {
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// The record field this column reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Header text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the author marked this column sticky.
    ///
    /// Cleared when every column was marked sticky.
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// Resolved left pinning.
    pub fn sticky_left(&self) -> bool {
        self.sticky_left
    }

    /// Resolved right pinning.
    pub fn sticky_right(&self) -> bool {
        self.sticky_right
    }

    pub fn width(&self) -> Option<Width> {
        self.width
    }

    pub fn is_sortable(&self) -> bool {
        self.sort_fn.is_some()
    }

    /// The attached sort function. Invoking it is up to the caller.
    pub fn sort_fn(&self) -> Option<&SortFn<T>> {
        self.sort_fn.as_ref()
    }

    /// Format a raw value with this column's formatter.
    pub fn format(&self, value: &Value) -> String {
        (self.formatter)(value)
    }
}

impl<T> Clone for ColumnConfiguration<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            field: self.field.clone(),
            name: self.name.clone(),
            formatter: Rc::clone(&self.formatter),
            sort_fn: self.sort_fn.clone(),
            sticky: self.sticky,
            sticky_left: self.sticky_left,
            sticky_right: self.sticky_right,
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for ColumnConfiguration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfiguration")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("name", &self.name)
            .field("sortable", &self.sort_fn.is_some())
            .field("sticky", &self.sticky)
            .field("sticky_left", &self.sticky_left)
            .field("sticky_right", &self.sticky_right)
            .field("width", &self.width)
            .finish()
    }
}

/// Immutable table configuration.
pub struct TableSpec<T> {
    pub(crate) columns: Vec<ColumnConfiguration<T>>,
    pub(crate) row_id_field: String,
    pub(crate) sticky_header: bool,
    pub(crate) sticky_footer: bool,
    pub(crate) selection_mode: SelectionMode,
    pub(crate) sticky_selection: bool,
    pub(crate) selection_filter: SelectionFilterFn<T>,
    pub(crate) expandable: bool,
    pub(crate) sticky_expandable: bool,
    pub(crate) expansion_fn: ExpansionFn<T>,
}

impl<T: TableRow> TableSpec<T> {
    pub fn columns(&self) -> &[ColumnConfiguration<T>] {
        &self.columns
    }

    /// Field holding the row identity.
    pub fn row_id_field(&self) -> &str {
        &self.row_id_field
    }

    pub fn sticky_header(&self) -> bool {
        self.sticky_header
    }

    pub fn sticky_footer(&self) -> bool {
        self.sticky_footer
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub fn sticky_selection(&self) -> bool {
        self.sticky_selection
    }

    pub fn expandable(&self) -> bool {
        self.expandable
    }

    pub fn sticky_expandable(&self) -> bool {
        self.sticky_expandable
    }

    /// Identity of `row`.
    pub fn row_key(&self, row: &T) -> RowKey {
        RowKey::of(row, &self.row_id_field)
    }

    /// Whether `row` passes the selection filter.
    pub fn can_select(&self, row: &T) -> bool {
        (self.selection_filter)(row)
    }

    /// Expanded detail of `row`.
    pub fn expand(&self, row: &T) -> T {
        (self.expansion_fn)(row)
    }
}

impl<T> fmt::Debug for TableSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSpec")
            .field("columns", &self.columns)
            .field("row_id_field", &self.row_id_field)
            .field("sticky_header", &self.sticky_header)
            .field("sticky_footer", &self.sticky_footer)
            .field("selection_mode", &self.selection_mode)
            .field("sticky_selection", &self.sticky_selection)
            .field("expandable", &self.expandable)
            .field("sticky_expandable", &self.sticky_expandable)
            .finish_non_exhaustive()
    }
}
