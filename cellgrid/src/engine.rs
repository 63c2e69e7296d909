//! Cell reconciliation engine.
//!
//! Owns the flat cell sequence: row-major, one block of `column_count` cells
//! per row. Row operations from a [`RowDiffer`](crate::RowDiffer) are turned
//! into splices of that sequence; it is never rebuilt wholesale while the
//! spec stays the same. Every published sequence satisfies
//! `len == rows * column_count`.

use std::rc::Rc;

use crate::cell::{cell_id, Cell, CellRef, CellSnapshot};
use crate::diff::{RowOperation, RowOperationKind};
use crate::model::RenderModel;
use crate::row::TableRow;
use crate::stream::{Subject, Subscription};

/// Sole owner and writer of the flat cell sequence.
#[derive(Debug)]
pub struct CellEngine {
    cells: Vec<CellRef>,
    subject: Subject<CellSnapshot>,
}

impl Default for CellEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CellEngine {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            subject: Subject::new(Rc::from(Vec::<CellRef>::new())),
        }
    }

    /// Latest published sequence.
    pub fn cells(&self) -> CellSnapshot {
        self.subject.get()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Observe the sequence. The listener gets the current one immediately.
    pub fn subscribe(&self, listener: impl Fn(&CellSnapshot) + 'static) -> Subscription {
        self.subject.subscribe(listener)
    }

    /// Build the cell block of `row` placed at `row_index`.
    pub fn project_row<T: TableRow>(row: &T, row_index: usize, model: &RenderModel<T>) -> Vec<CellRef> {
        model
            .column_configs()
            .iter()
            .enumerate()
            .map(|(column_index, column)| {
                let value = column.format(&row.field(column.field()));
                Rc::new(Cell::new(row_index, column_index, column, value))
            })
            .collect()
    }

    /// Re-derive the ids of a block moved to `row_index` and mark it dirty.
    ///
    /// Cells are matched to columns by column identity, not by field name.
    /// A cell whose column is no longer in the model is returned unchanged.
    pub fn refresh_block<T: TableRow>(
        cells: &[CellRef],
        row_index: usize,
        model: &RenderModel<T>,
    ) -> Vec<CellRef> {
        let columns = model.column_configs();
        cells
            .iter()
            .map(|cell| match columns.iter().position(|c| c.id() == cell.column) {
                Some(column_index) => Rc::new(cell.relocated(row_index, column_index)),
                None => {
                    log::warn!(
                        "[cells] refreshing cell {} whose column configuration is gone (field '{}')",
                        cell.cell_id,
                        cell.field
                    );
                    Rc::clone(cell)
                }
            })
            .collect()
    }

    /// Splice a row block in at `row_index` and publish.
    pub fn insert_block<T: TableRow>(
        &mut self,
        cells: Vec<CellRef>,
        row_index: usize,
        model: &RenderModel<T>,
    ) {
        let mut offset = row_index * model.column_count();
        if offset > self.cells.len() {
            log::warn!(
                "[cells] insert at row {} is past the end ({} cells), appending",
                row_index,
                self.cells.len()
            );
            offset = self.cells.len();
        }
        log::debug!("[cells] insert {} cells at {}", cells.len(), offset);
        self.cells.splice(offset..offset, cells);
        self.publish();
    }

    /// Splice out the block of `row_index` and return it.
    ///
    /// `None` is an unknown row: logged, nothing removed. With `emit` false
    /// the change is not published, so a move can publish once on insert.
    pub fn remove_block<T: TableRow>(
        &mut self,
        row_index: Option<usize>,
        model: &RenderModel<T>,
        emit: bool,
    ) -> Vec<CellRef> {
        let Some(row_index) = row_index else {
            log::warn!("[cells] trying to remove an unknown row");
            return Vec::new();
        };

        let len = self.cells.len();
        let start = (row_index * model.column_count()).min(len);
        let end = (start + model.column_count()).min(len);
        if end - start < model.column_count() {
            log::warn!(
                "[cells] removing row {} only found {} of {} cells",
                row_index,
                end - start,
                model.column_count()
            );
        }

        log::debug!("[cells] remove cells {}..{}", start, end);
        let removed: Vec<CellRef> = self.cells.drain(start..end).collect();
        if emit {
            self.publish();
        }
        removed
    }

    /// Drop every cell and publish the empty sequence.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.publish();
    }

    /// Apply one batch of row operations, in order.
    ///
    /// `rows` is the new collection the operations were computed for; new
    /// rows are read from it at their current index. Once the batch is done,
    /// every cell id matches its row position again.
    pub fn apply<T: TableRow>(&mut self, ops: &[RowOperation], rows: &[T], model: &RenderModel<T>) {
        for op in ops {
            match op.kind() {
                RowOperationKind::Insert => {
                    let Some(current) = op.current_index else {
                        continue;
                    };
                    match rows.get(current) {
                        Some(row) => {
                            let cells = Self::project_row(row, current, model);
                            self.insert_block(cells, current, model);
                        }
                        None => log::warn!(
                            "[cells] insert of row {} at {} has no matching row",
                            op.key,
                            current
                        ),
                    }
                }
                RowOperationKind::Remove => {
                    self.remove_block(op.adjusted_previous_index, model, true);
                }
                RowOperationKind::Move => {
                    let Some(current) = op.current_index else {
                        continue;
                    };
                    if op.adjusted_previous_index == Some(current) {
                        continue;
                    }
                    let moved = self.remove_block(op.adjusted_previous_index, model, false);
                    let cells = Self::refresh_block(&moved, current, model);
                    self.insert_block(cells, current, model);
                }
            }
        }

        let shifted = self.renumber(model);
        if shifted > 0 {
            log::debug!("[cells] renumbered {} shifted cells", shifted);
            self.publish();
        }
    }

    /// Re-derive the id of every cell whose block now sits at another row
    /// index. Returns the number of relocated cells.
    ///
    /// Inserts and removals shift the rows after them without any operation
    /// of their own; those blocks are caught here and marked dirty.
    fn renumber<T: TableRow>(&mut self, model: &RenderModel<T>) -> usize {
        let columns = model.column_count();
        if columns == 0 {
            return 0;
        }
        let mut shifted = 0;
        for (offset, cell) in self.cells.iter_mut().enumerate() {
            let (row_index, column_index) = (offset / columns, offset % columns);
            if cell.cell_id != cell_id(row_index, column_index) {
                *cell = Rc::new(cell.relocated(row_index, column_index));
                shifted += 1;
            }
        }
        shifted
    }

    fn publish(&self) {
        self.subject.publish(Rc::from(self.cells.as_slice()));
    }
}
