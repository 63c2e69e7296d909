//! Per-column builder.

use std::rc::Rc;

use serde_json::Value;

use crate::spec::{CellFormatter, ColumnConfiguration, ColumnId, SortFn};
use crate::width::Width;

/// Builder for a single column, handed to the closure of
/// [`TableBuilder::with_column`](super::TableBuilder::with_column).
///
/// # Examples
///
/// ```
/// use cellgrid::{TableBuilder, Width};
/// use serde_json::Value;
///
/// let spec = TableBuilder::<Value>::for_row_id("id")
///     .with_column("name", |c| c.with_name("Name").sticky().width(Width::Ch(20)))
///     .build();
/// assert_eq!(spec.columns()[0].name(), "Name");
/// ```
pub struct ColumnBuilder<T> {
    field: String,
    name: Option<String>,
    formatter: Option<CellFormatter>,
    sticky: bool,
    sort_fn: Option<SortFn<T>>,
    width: Option<Width>,
}

impl<T> ColumnBuilder<T> {
    pub(crate) fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: None,
            formatter: None,
            sticky: false,
            sort_fn: None,
            width: None,
        }
    }

    /// Set the header text. Defaults to the field name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the cell formatter. Defaults to the JSON stringifier.
    pub fn format_with(mut self, formatter: impl Fn(&Value) -> String + 'static) -> Self {
        self.formatter = Some(Rc::new(formatter));
        self
    }

    /// Pin this column and everything between it and the nearest edge.
    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Attach a sort function.
    pub fn sortable(mut self, sort_fn: impl Fn(&[T], &str) -> Vec<T> + 'static) -> Self {
        self.sort_fn = Some(Rc::new(sort_fn));
        self
    }

    /// Set the column width.
    pub fn width(mut self, width: Width) -> Self {
        self.width = Some(width);
        self
    }

    pub(crate) fn build(self) -> ColumnConfiguration<T> {
        let name = self.name.unwrap_or_else(|| self.field.clone());
        ColumnConfiguration {
            id: ColumnId::new(),
            field: self.field,
            name,
            formatter: self.formatter.unwrap_or_else(stringify),
            sort_fn: self.sort_fn,
            sticky: self.sticky,
            sticky_left: false,
            sticky_right: false,
            width: self.width,
        }
    }
}

/// Default formatter: the value as JSON text.
fn stringify() -> CellFormatter {
    Rc::new(|value: &Value| value.to_string())
}
