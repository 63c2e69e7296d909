//! Fluent table configuration builder.
//!
//! Every call consumes the builder and hands it back, so a configuration is
//! assembled in one chain and frozen by [`TableBuilder::build`]. Sticky
//! resolution runs once, inside `build`.

mod column;
mod sticky;

use std::rc::Rc;

pub use column::ColumnBuilder;

use crate::row::TableRow;
use crate::selection::SelectionMode;
use crate::spec::{ExpansionFn, SelectionFilterFn, TableSpec};

/// Options for [`TableBuilder::with_selection`].
pub enum SelectionOptions<T> {
    /// Keep the defaults: every row selectable, selection column sticky.
    Unset,
    /// Only set whether the selection column is sticky.
    Sticky(bool),
    /// Restrict selectable rows; the selection column stays sticky.
    Filter(SelectionFilterFn<T>),
    /// Restrict selectable rows and set stickiness.
    FilterAndSticky(SelectionFilterFn<T>, bool),
}

impl<T> SelectionOptions<T> {
    /// Restrict selectable rows with a closure.
    pub fn filter(filter: impl Fn(&T) -> bool + 'static) -> Self {
        SelectionOptions::Filter(Rc::new(filter))
    }
}

/// Options for [`TableBuilder::expandable`].
pub enum ExpansionOptions<T> {
    /// Expand to the row itself, expansion column sticky.
    Unset,
    /// Only set whether the expansion column is sticky.
    Sticky(bool),
    /// Expand with a function; stickiness keeps its current value.
    With(ExpansionFn<T>),
    /// Expand with a function and set stickiness.
    WithAndSticky(ExpansionFn<T>, bool),
}

impl<T> ExpansionOptions<T> {
    /// Expand with a closure.
    pub fn with(expansion: impl Fn(&T) -> T + 'static) -> Self {
        ExpansionOptions::With(Rc::new(expansion))
    }
}

/// Builder for a [`TableSpec`].
///
/// The row-id field is required up front, so a spec without row identity
/// cannot be built.
///
/// # Examples
///
/// ```
/// use cellgrid::{SelectionMode, SelectionOptions, TableBuilder};
/// use serde_json::Value;
///
/// let spec = TableBuilder::<Value>::for_row_id("id")
///     .with_column("id", |c| c.sticky())
///     .with_column("name", |c| c.with_name("Name"))
///     .with_selection(SelectionMode::Checkbox, SelectionOptions::Sticky(false))
///     .sticky_header()
///     .build();
///
/// assert_eq!(spec.columns().len(), 2);
/// assert!(!spec.sticky_selection());
/// ```
pub struct TableBuilder<T> {
    row_id_field: String,
    columns: Vec<ColumnBuilder<T>>,
    sticky_header: bool,
    sticky_footer: bool,
    selection_mode: SelectionMode,
    sticky_selection: bool,
    selection_filter: Option<SelectionFilterFn<T>>,
    expandable: bool,
    sticky_expandable: bool,
    expansion_fn: Option<ExpansionFn<T>>,
}

impl<T: TableRow> TableBuilder<T> {
    /// Start a table whose rows are identified by `field`.
    pub fn for_row_id(field: impl Into<String>) -> Self {
        Self {
            row_id_field: field.into(),
            columns: Vec::new(),
            sticky_header: false,
            sticky_footer: false,
            selection_mode: SelectionMode::None,
            sticky_selection: true,
            selection_filter: None,
            expandable: false,
            sticky_expandable: true,
            expansion_fn: None,
        }
    }

    /// Append a column reading `field`, configured by `configure`.
    ///
    /// The same field may back several columns.
    pub fn with_column(
        mut self,
        field: impl Into<String>,
        configure: impl FnOnce(ColumnBuilder<T>) -> ColumnBuilder<T>,
    ) -> Self {
        self.columns.push(configure(ColumnBuilder::new(field)));
        self
    }

    /// Enable row selection.
    pub fn with_selection(mut self, mode: SelectionMode, options: SelectionOptions<T>) -> Self {
        self.selection_mode = mode;
        match options {
            SelectionOptions::Unset => {}
            SelectionOptions::Sticky(sticky) => self.sticky_selection = sticky,
            SelectionOptions::Filter(filter) => {
                self.selection_filter = Some(filter);
                self.sticky_selection = true;
            }
            SelectionOptions::FilterAndSticky(filter, sticky) => {
                self.selection_filter = Some(filter);
                self.sticky_selection = sticky;
            }
        }
        self
    }

    /// Make rows expandable.
    pub fn expandable(mut self, options: ExpansionOptions<T>) -> Self {
        match options {
            ExpansionOptions::Unset => {}
            ExpansionOptions::Sticky(sticky) => self.sticky_expandable = sticky,
            ExpansionOptions::With(expansion) => self.expansion_fn = Some(expansion),
            ExpansionOptions::WithAndSticky(expansion, sticky) => {
                self.expansion_fn = Some(expansion);
                self.sticky_expandable = sticky;
            }
        }
        self.expandable = true;
        self
    }

    pub fn sticky_header(mut self) -> Self {
        self.sticky_header = true;
        self
    }

    pub fn sticky_footer(mut self) -> Self {
        self.sticky_footer = true;
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> TableSpec<T> {
        let mut columns: Vec<_> = self.columns.into_iter().map(ColumnBuilder::build).collect();
        sticky::resolve_sticky(&mut columns);

        let selection_filter: SelectionFilterFn<T> = match self.selection_filter {
            Some(filter) => filter,
            None => Rc::new(|_: &T| true),
        };
        let expansion_fn: ExpansionFn<T> = match self.expansion_fn {
            Some(expansion) => expansion,
            None => Rc::new(|row: &T| row.clone()),
        };

        TableSpec {
            columns,
            row_id_field: self.row_id_field,
            sticky_header: self.sticky_header,
            sticky_footer: self.sticky_footer,
            selection_mode: self.selection_mode,
            sticky_selection: self.sticky_selection,
            selection_filter,
            expandable: self.expandable,
            sticky_expandable: self.sticky_expandable,
            expansion_fn,
        }
    }
}
