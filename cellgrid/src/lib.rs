//! Incrementally reconciled table cells.
//!
//! A [`TableBuilder`] produces an immutable [`TableSpec`], which compiles into
//! a [`RenderModel`]. The [`CellEngine`] keeps a flat, row-major cell sequence
//! in sync with a changing row collection by applying the insert / move /
//! remove operations of a [`RowDiffer`], and publishes every change on a
//! synchronous state stream. [`Table`] ties these together into update
//! cycles.

pub mod builder;
pub mod cell;
pub mod diff;
pub mod engine;
pub mod error;
pub mod model;
pub mod row;
pub mod selection;
pub mod spec;
pub mod stream;
pub mod table;
pub mod width;

pub use builder::{ColumnBuilder, ExpansionOptions, SelectionOptions, TableBuilder};
pub use cell::{Cell, CellRef, CellSnapshot};
pub use diff::{KeyedDiffer, RowDiffer, RowOperation, RowOperationKind};
pub use engine::CellEngine;
pub use error::{Result, TableError};
pub use model::{compile, compile_with, ColumnView, GridConfig, ModelCache, RenderModel};
pub use row::{RowKey, TableRow};
pub use selection::{Selection, SelectionMode};
pub use spec::{ColumnConfiguration, ColumnId, TableSpec};
pub use stream::{Subject, Subscription};
pub use table::{Table, TableInput};
pub use width::Width;
