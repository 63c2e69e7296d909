//! Table host: drives one table through discrete update cycles.
//!
//! Inputs (configuration and data) are only marked dirty when set;
//! [`Table::check`] runs the cycle. A new configuration clears every cell and
//! rebuilds from scratch. New data is diffed against the previous rows and
//! applied to the cells incrementally.

use std::any::type_name;
use std::collections::HashSet;
use std::rc::Rc;

use crate::cell::CellSnapshot;
use crate::diff::{KeyedDiffer, RowDiffer};
use crate::engine::CellEngine;
use crate::error::{Result, TableError};
use crate::model::{GridConfig, ModelCache, RenderModel};
use crate::row::{RowKey, TableRow};
use crate::selection::{Selection, SelectionMode};
use crate::spec::TableSpec;
use crate::stream::Subscription;

/// Data handed to a table.
#[derive(Debug, Clone)]
pub enum TableInput<T> {
    /// A row collection; the only diffable shape.
    Rows(Vec<T>),
    /// A lone record. Cannot be diffed.
    Record(T),
}

impl<T> From<Vec<T>> for TableInput<T> {
    fn from(rows: Vec<T>) -> Self {
        TableInput::Rows(rows)
    }
}

/// One table instance: configuration, rows, cells, selection and expansion.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use cellgrid::{Table, TableBuilder};
/// use serde_json::{json, Value};
///
/// let spec = TableBuilder::<Value>::for_row_id("id")
///     .with_column("id", |c| c)
///     .with_column("name", |c| c)
///     .build();
///
/// let mut table = Table::new();
/// table.set_configuration(Some(Rc::new(spec)));
/// table.set_data(vec![json!({"id": 1, "name": "a"}), json!({"id": 2, "name": "b"})]);
/// table.check().unwrap();
///
/// assert_eq!(table.cells().len(), 4);
/// ```
pub struct Table<T: TableRow, D: RowDiffer<T> = KeyedDiffer> {
    spec: Option<Rc<TableSpec<T>>>,
    model: Option<Rc<RenderModel<T>>>,
    models: ModelCache<T>,
    engine: CellEngine,
    differ: D,
    input: Option<TableInput<T>>,
    rows: Vec<T>,
    spec_dirty: bool,
    data_dirty: bool,
    selection: Selection,
    expanded: HashSet<RowKey>,
}

impl<T: TableRow> Table<T> {
    /// Table using the [`KeyedDiffer`].
    pub fn new() -> Self {
        Self::with_differ(KeyedDiffer::new())
    }
}

impl<T: TableRow> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRow, D: RowDiffer<T>> Table<T, D> {
    /// Table using a custom differ.
    pub fn with_differ(differ: D) -> Self {
        Self {
            spec: None,
            model: None,
            models: ModelCache::default(),
            engine: CellEngine::new(),
            differ,
            input: None,
            rows: Vec::new(),
            spec_dirty: true,
            data_dirty: true,
            selection: Selection::default(),
            expanded: HashSet::new(),
        }
    }

    /// Use explicit grid sizing tokens.
    pub fn with_grid_config(mut self, config: GridConfig) -> Self {
        self.models = ModelCache::new(config);
        self.spec_dirty = true;
        self
    }

    /// Replace the configuration. Takes effect on the next [`check`](Self::check).
    pub fn set_configuration(&mut self, spec: Option<Rc<TableSpec<T>>>) {
        self.spec = spec;
        self.spec_dirty = true;
    }

    pub fn configuration(&self) -> Option<&Rc<TableSpec<T>>> {
        self.spec.as_ref()
    }

    /// Replace the data. Takes effect on the next [`check`](Self::check).
    pub fn set_data(&mut self, input: impl Into<TableInput<T>>) {
        self.input = Some(input.into());
        self.data_dirty = true;
    }

    /// Edit the current rows in place. Takes effect on the next
    /// [`check`](Self::check).
    pub fn update_rows(&mut self, edit: impl FnOnce(&mut Vec<T>)) {
        let mut rows = match self.input.take() {
            Some(TableInput::Rows(rows)) => rows,
            Some(record @ TableInput::Record(_)) => {
                self.input = Some(record);
                return;
            }
            None => self.rows.clone(),
        };
        edit(&mut rows);
        self.input = Some(TableInput::Rows(rows));
        self.data_dirty = true;
    }

    /// Run one update cycle.
    ///
    /// Fails only when the data cannot be diffed at all.
    pub fn check(&mut self) -> Result<()> {
        if self.spec_dirty {
            self.spec_dirty = false;
            self.data_dirty = true;
            self.model = None;
            self.engine.clear();
            self.differ.reset();
            self.expanded.clear();
            self.selection = Selection::new(
                self.spec
                    .as_ref()
                    .map_or(SelectionMode::None, |s| s.selection_mode()),
            );
            if let Some(spec) = &self.spec {
                self.model = Some(self.models.get(spec));
                log::debug!("[table] configuration compiled");
            }
        }

        let Some(model) = self.model.clone() else {
            return Ok(());
        };
        if !self.data_dirty {
            return Ok(());
        }

        match self.input.take() {
            Some(TableInput::Rows(rows)) => self.rows = rows,
            Some(record @ TableInput::Record(_)) => {
                self.input = Some(record);
                return Err(TableError::UnsupportedCollection {
                    type_name: type_name::<T>(),
                });
            }
            None => {}
        }
        self.data_dirty = false;

        let identity = model.identity_fn();
        let ops = self.differ.diff(&self.rows, &identity);
        self.engine.apply(&ops, &self.rows, &model);

        let live: HashSet<RowKey> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| model.track_by(index, row))
            .collect();
        self.selection.retain(|key| live.contains(key));
        self.expanded.retain(|key| live.contains(key));

        log::debug!(
            "[table] {} rows, {} operations, {} cells",
            self.rows.len(),
            ops.len(),
            self.engine.len()
        );
        Ok(())
    }

    /// Current render model, once a configuration has been checked in.
    pub fn model(&self) -> Option<&Rc<RenderModel<T>>> {
        self.model.as_ref()
    }

    /// Rows the cells currently reflect.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Latest flat cell sequence.
    pub fn cells(&self) -> CellSnapshot {
        self.engine.cells()
    }

    /// Observe the flat cell sequence.
    pub fn subscribe(&self, listener: impl Fn(&CellSnapshot) + 'static) -> Subscription {
        self.engine.subscribe(listener)
    }

    /// Number of data columns.
    pub fn data_column_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.columns.len())
    }

    /// Data columns plus the selection and expansion columns.
    pub fn displayed_column_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| {
            m.columns.len() + usize::from(m.selectable) + usize::from(m.expandable)
        })
    }

    /// Row with the given key.
    pub fn row(&self, key: &RowKey) -> Option<&T> {
        let spec = self.checked_spec()?;
        self.rows.iter().find(|row| &spec.row_key(row) == key)
    }

    /// Spec of the last checked-in configuration. A configuration set but
    /// not yet checked does not apply to the current rows.
    fn checked_spec(&self) -> Option<&Rc<TableSpec<T>>> {
        self.model.as_ref().map(|model| model.spec())
    }

    /// Toggle selection of a row. Returns true if the selection changed.
    ///
    /// Rows rejected by the selection filter cannot be selected.
    pub fn toggle_selection(&mut self, key: &RowKey) -> bool {
        let Some(spec) = self.checked_spec() else {
            return false;
        };
        let selectable = match self.row(key) {
            Some(row) => spec.can_select(row),
            None => return false,
        };
        if !selectable {
            log::debug!("[table] row {} is not selectable", key);
            return false;
        }
        self.selection.toggle(key.clone())
    }

    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selection.is_selected(key)
    }

    pub fn selected_keys(&self) -> impl Iterator<Item = &RowKey> {
        self.selection.keys()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Toggle expansion of a row. Returns true if it changed.
    pub fn toggle_expanded(&mut self, key: &RowKey) -> bool {
        let expandable = self.model.as_ref().is_some_and(|m| m.expandable);
        if !expandable || self.row(key).is_none() {
            return false;
        }
        if !self.expanded.remove(key) {
            self.expanded.insert(key.clone());
        }
        true
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.contains(key)
    }

    /// Expanded detail of a row.
    pub fn expansion(&self, key: &RowKey) -> Option<T> {
        let spec = self.checked_spec()?;
        self.row(key).map(|row| spec.expand(row))
    }
}
