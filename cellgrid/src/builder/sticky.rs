//! Sticky column resolution.
//!
//! Authors mark a boundary column sticky to mean "pin everything from here to
//! the nearest edge". The column list is split at its midpoint; in each half
//! the sticky column closest to the centre becomes the pivot and pinning
//! spreads from it to the table edge. With an odd count the centre column
//! belongs to both halves.

use crate::spec::ColumnConfiguration;

/// Resolve `sticky_left` / `sticky_right` for every column in place.
pub(crate) fn resolve_sticky<T>(columns: &mut [ColumnConfiguration<T>]) {
    for column in columns.iter_mut() {
        column.sticky_left = false;
        column.sticky_right = false;
    }

    // A fully pinned table cannot scroll at all.
    if columns.iter().all(|c| c.sticky) {
        for column in columns.iter_mut() {
            column.sticky = false;
        }
        return;
    }

    let len = columns.len();
    let left_end = len.div_ceil(2);
    let right_start = len / 2;

    if let Some(pivot) = (0..left_end).rev().find(|&i| columns[i].sticky) {
        for column in &mut columns[..=pivot] {
            column.sticky_left = true;
        }
    }

    if let Some(pivot) = (right_start..len).find(|&i| columns[i].sticky) {
        for column in &mut columns[pivot..] {
            column.sticky_right = true;
        }
    }
}
