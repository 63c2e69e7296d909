//! Render model: the renderer-facing projection of a [`TableSpec`].

use std::fmt;
use std::rc::Rc;

use crate::row::{RowKey, TableRow};
use crate::selection::SelectionMode;
use crate::spec::{ColumnConfiguration, TableSpec};
use crate::width::Width;

/// Grid sizing tokens used when compiling a spec.
///
/// # Example
///
/// ```
/// use cellgrid::GridConfig;
///
/// let config = GridConfig::default()
///     .with_default_column_width("2fr")
///     .with_control_column_width("40px");
/// assert_eq!(config.default_column_width, "2fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Token for columns without an explicit width.
    ///
    /// Default: `1fr`
    pub default_column_width: String,

    /// Token for the selection and expansion columns.
    ///
    /// Default: `min-content`
    pub control_column_width: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_column_width: Width::default().to_string(),
            control_column_width: "min-content".to_string(),
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token for columns without an explicit width.
    pub fn with_default_column_width(mut self, token: impl Into<String>) -> Self {
        self.default_column_width = token.into();
        self
    }

    /// Sets the token for the selection and expansion columns.
    pub fn with_control_column_width(mut self, token: impl Into<String>) -> Self {
        self.control_column_width = token.into();
        self
    }
}

/// Display descriptor of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub name: String,
    pub sortable: bool,
    pub sticky_left: bool,
    pub sticky_right: bool,
    pub width: Option<Width>,
}

/// Compiled view of a [`TableSpec`], consumed by the cell engine and the
/// renderer.
pub struct RenderModel<T> {
    spec: Rc<TableSpec<T>>,
    pub column_template: String,
    pub columns: Vec<ColumnView>,
    pub sticky_header: bool,
    pub sticky_footer: bool,
    pub selectable: bool,
    pub with_checkbox: bool,
    pub with_radio: bool,
    pub sticky_selection: bool,
    pub expandable: bool,
    pub sticky_expandable: bool,
}

impl<T: TableRow> RenderModel<T> {
    /// The spec this model was compiled from.
    pub fn spec(&self) -> &Rc<TableSpec<T>> {
        &self.spec
    }

    /// Column configurations, in display order.
    pub fn column_configs(&self) -> &[ColumnConfiguration<T>] {
        self.spec.columns()
    }

    /// Number of data columns (one cell per row each).
    pub fn column_count(&self) -> usize {
        self.spec.columns().len()
    }

    /// Row identity bound to the spec's row-id field.
    pub fn track_by(&self, _index: usize, row: &T) -> RowKey {
        self.spec.row_key(row)
    }

    /// [`track_by`](Self::track_by) as a standalone closure.
    pub fn identity_fn(&self) -> impl Fn(usize, &T) -> RowKey + use<T> {
        let spec = Rc::clone(&self.spec);
        move |_: usize, row: &T| spec.row_key(row)
    }
}

impl<T> fmt::Debug for RenderModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderModel")
            .field("column_template", &self.column_template)
            .field("columns", &self.columns)
            .field("selectable", &self.selectable)
            .field("sticky_selection", &self.sticky_selection)
            .field("expandable", &self.expandable)
            .field("sticky_expandable", &self.sticky_expandable)
            .finish_non_exhaustive()
    }
}

/// Compile a spec with the default [`GridConfig`].
pub fn compile<T: TableRow>(spec: &Rc<TableSpec<T>>) -> RenderModel<T> {
    compile_with(spec, &GridConfig::default())
}

/// Compile a spec into its render model.
pub fn compile_with<T: TableRow>(spec: &Rc<TableSpec<T>>, config: &GridConfig) -> RenderModel<T> {
    let columns = spec.columns();

    let mut tracks: Vec<String> = columns
        .iter()
        .map(|c| match c.width() {
            Some(width) => width.to_string(),
            None => config.default_column_width.clone(),
        })
        .collect();
    if spec.selection_mode() != SelectionMode::None {
        tracks.insert(0, config.control_column_width.clone());
    }
    if spec.expandable() {
        tracks.push(config.control_column_width.clone());
    }

    let first_sticky = columns.first().is_some_and(|c| c.is_sticky());
    let last_sticky = columns.last().is_some_and(|c| c.is_sticky());

    RenderModel {
        spec: Rc::clone(spec),
        column_template: tracks.join(" "),
        columns: columns
            .iter()
            .map(|c| ColumnView {
                name: c.name().to_string(),
                sortable: c.is_sortable(),
                sticky_left: c.sticky_left(),
                sticky_right: c.sticky_right(),
                width: c.width(),
            })
            .collect(),
        sticky_header: spec.sticky_header(),
        sticky_footer: spec.sticky_footer(),
        selectable: spec.selection_mode() != SelectionMode::None,
        with_checkbox: spec.selection_mode() == SelectionMode::Checkbox,
        with_radio: spec.selection_mode() == SelectionMode::Radio,
        sticky_selection: spec.sticky_selection() || first_sticky,
        expandable: spec.expandable(),
        sticky_expandable: spec.sticky_expandable() || last_sticky,
    }
}

/// Caches the render model of the last compiled spec instance.
pub struct ModelCache<T> {
    config: GridConfig,
    last: Option<Rc<RenderModel<T>>>,
}

impl<T: TableRow> ModelCache<T> {
    pub fn new(config: GridConfig) -> Self {
        Self { config, last: None }
    }

    /// Model for `spec`, recompiled only when the spec instance changes.
    pub fn get(&mut self, spec: &Rc<TableSpec<T>>) -> Rc<RenderModel<T>> {
        if let Some(model) = &self.last {
            if Rc::ptr_eq(model.spec(), spec) {
                return Rc::clone(model);
            }
        }
        let model = Rc::new(compile_with(spec, &self.config));
        self.last = Some(Rc::clone(&model));
        model
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

impl<T: TableRow> Default for ModelCache<T> {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
