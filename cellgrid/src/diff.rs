//! Row-level sequence diffing.
//!
//! A [`RowDiffer`] compares the row collection of one update cycle with the
//! previous one and reports insert / move / remove operations. Operations
//! are meant to be applied in order: each `adjusted_previous_index` already
//! accounts for every earlier operation of the same batch.

use std::collections::{HashMap, VecDeque};

use crate::row::RowKey;

/// What a [`RowOperation`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOperationKind {
    Insert,
    Move,
    Remove,
}

/// One row-level change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOperation {
    /// Identity of the affected row.
    pub key: RowKey,
    /// Index in the previous collection, `None` for new rows.
    pub previous_index: Option<usize>,
    /// Index in the working sequence once earlier operations are applied.
    pub adjusted_previous_index: Option<usize>,
    /// Index in the new collection, `None` for removed rows.
    pub current_index: Option<usize>,
}

impl RowOperation {
    pub fn kind(&self) -> RowOperationKind {
        match (self.previous_index, self.current_index) {
            (None, _) => RowOperationKind::Insert,
            (Some(_), None) => RowOperationKind::Remove,
            (Some(_), Some(_)) => RowOperationKind::Move,
        }
    }
}

/// Produces row operations between successive row collections.
pub trait RowDiffer<T> {
    /// Diff `rows` against the collection seen by the previous call.
    fn diff(&mut self, rows: &[T], identity: &dyn Fn(usize, &T) -> RowKey) -> Vec<RowOperation>;

    /// Forget the previous collection; the next diff inserts every row.
    fn reset(&mut self);
}

/// Identity-keyed differ.
///
/// Rows are matched by key, occurrence by occurrence when keys repeat.
/// Removals come first in ascending order, then each position of the new
/// collection is filled by an insertion or by moving the matched row into
/// place. Rows already in place produce no operation.
#[derive(Debug, Clone, Default)]
pub struct KeyedDiffer {
    previous: Vec<RowKey>,
}

impl KeyedDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of the last diffed collection.
    pub fn previous(&self) -> &[RowKey] {
        &self.previous
    }

    /// Diff a key sequence against the previous one.
    pub fn diff_keys(&mut self, next: Vec<RowKey>) -> Vec<RowOperation> {
        let previous = std::mem::take(&mut self.previous);

        let mut by_key: HashMap<&RowKey, VecDeque<usize>> = HashMap::new();
        for (index, key) in previous.iter().enumerate() {
            by_key.entry(key).or_default().push_back(index);
        }

        let sources: Vec<Option<usize>> = next
            .iter()
            .map(|key| by_key.get_mut(key).and_then(VecDeque::pop_front))
            .collect();

        let mut survives = vec![false; previous.len()];
        for source in sources.iter().flatten() {
            survives[*source] = true;
        }

        let mut ops = Vec::new();

        let mut removed = 0;
        for (index, key) in previous.iter().enumerate() {
            if !survives[index] {
                ops.push(RowOperation {
                    key: key.clone(),
                    previous_index: Some(index),
                    adjusted_previous_index: Some(index - removed),
                    current_index: None,
                });
                removed += 1;
            }
        }

        // The working sequence is always: rows already placed (positions
        // before `current`), then the unplaced survivors in previous order.
        let mut unplaced = Fenwick::new(previous.len());
        for (index, _) in survives.iter().enumerate().filter(|(_, s)| **s) {
            unplaced.add(index, 1);
        }

        for (current, source) in sources.into_iter().enumerate() {
            match source {
                None => ops.push(RowOperation {
                    key: next[current].clone(),
                    previous_index: None,
                    adjusted_previous_index: None,
                    current_index: Some(current),
                }),
                Some(index) => {
                    let position = current + unplaced.prefix_sum(index);
                    unplaced.add(index, -1);
                    if position != current {
                        ops.push(RowOperation {
                            key: next[current].clone(),
                            previous_index: Some(index),
                            adjusted_previous_index: Some(position),
                            current_index: Some(current),
                        });
                    }
                }
            }
        }

        log::debug!(
            "[differ] {} -> {} rows, {} operations",
            previous.len(),
            next.len(),
            ops.len()
        );

        self.previous = next;
        ops
    }
}

impl<T> RowDiffer<T> for KeyedDiffer {
    fn diff(&mut self, rows: &[T], identity: &dyn Fn(usize, &T) -> RowKey) -> Vec<RowOperation> {
        let keys = rows
            .iter()
            .enumerate()
            .map(|(index, row)| identity(index, row))
            .collect();
        self.diff_keys(keys)
    }

    fn reset(&mut self) {
        self.previous.clear();
    }
}

/// Binary indexed tree over previous-row indices.
#[derive(Debug)]
struct Fenwick {
    tree: Vec<isize>,
}

impl Fenwick {
    fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    fn add(&mut self, index: usize, delta: isize) {
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// Sum over `0..index`.
    fn prefix_sum(&self, index: usize) -> usize {
        let mut sum = 0;
        let mut i = index;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &str) -> Vec<RowKey> {
        names
            .chars()
            .map(|c| RowKey::from_value(&serde_json::Value::String(c.to_string())))
            .collect()
    }

    /// Replay operations the way the cell engine does, on bare keys.
    fn replay(start: &[RowKey], ops: &[RowOperation]) -> Vec<RowKey> {
        let mut work = start.to_vec();
        for op in ops {
            match op.kind() {
                RowOperationKind::Insert => {
                    work.insert(op.current_index.unwrap(), op.key.clone());
                }
                RowOperationKind::Remove => {
                    work.remove(op.adjusted_previous_index.unwrap());
                }
                RowOperationKind::Move => {
                    let key = work.remove(op.adjusted_previous_index.unwrap());
                    work.insert(op.current_index.unwrap(), key);
                }
            }
        }
        work
    }

    fn check(before: &str, after: &str) -> Vec<RowOperation> {
        let mut differ = KeyedDiffer::new();
        differ.diff_keys(keys(before));
        let ops = differ.diff_keys(keys(after));
        assert_eq!(replay(&keys(before), &ops), keys(after), "{before} -> {after}");
        ops
    }

    #[test]
    fn first_diff_inserts_everything() {
        let ops = check("", "abc");
        assert!(ops.iter().all(|op| op.kind() == RowOperationKind::Insert));
        assert_eq!(
            ops.iter().map(|op| op.current_index).collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn unchanged_collection_is_silent() {
        assert!(check("abcd", "abcd").is_empty());
    }

    #[test]
    fn removal_indices_are_adjusted() {
        let ops = check("abcd", "bd");
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].adjusted_previous_index, Some(0));
        assert_eq!(ops[1].previous_index, Some(2));
        assert_eq!(ops[1].adjusted_previous_index, Some(1));
    }

    #[test]
    fn move_last_to_front_is_one_operation() {
        let ops = check("abc", "cab");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind(), RowOperationKind::Move);
        assert_eq!(ops[0].adjusted_previous_index, Some(2));
        assert_eq!(ops[0].current_index, Some(0));
    }

    #[test]
    fn mixed_batches_replay_correctly() {
        check("abcdef", "fxbdyea");
        check("abc", "");
        check("abcde", "edcba");
        check("aab", "baa");
        check("abab", "bbaa");
        check("xyz", "zqxw");
    }

    #[test]
    fn reset_forgets_previous_rows() {
        let mut differ = KeyedDiffer::new();
        differ.diff_keys(keys("ab"));
        RowDiffer::<()>::reset(&mut differ);
        let ops = differ.diff_keys(keys("ab"));
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| op.kind() == RowOperationKind::Insert));
    }
}
