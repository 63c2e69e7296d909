//! Selected rows of a table, tracked by row key.

use std::collections::HashSet;

use crate::row::RowKey;

/// How the control column in front of the data columns behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No control column; rows cannot be selected.
    #[default]
    None,
    /// Checkbox column: any number of rows at once.
    Checkbox,
    /// Radio column: at most one row. Picking another row replaces it.
    Radio,
}

/// Keys of the selected rows.
///
/// Keys survive reordering of the rows; the host drops keys whose rows
/// left the collection (see [`Selection::retain`]).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub mode: SelectionMode,
    selected: HashSet<RowKey>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Flip the row's selected state under the current mode.
    ///
    /// Returns false when the mode forbids selection.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        if self.mode == SelectionMode::None {
            return false;
        }
        let was_selected = self.selected.remove(&key);
        if self.mode == SelectionMode::Radio {
            self.selected.clear();
        }
        if !was_selected {
            self.selected.insert(key);
        }
        true
    }

    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop every selected key that `keep` rejects.
    pub fn retain(&mut self, keep: impl Fn(&RowKey) -> bool) {
        self.selected.retain(|key| keep(key));
    }

    /// Selected keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
