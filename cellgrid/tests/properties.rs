//! Property tests for row diffing and cell reconciliation.

use std::rc::Rc;

use cellgrid::{
    compile, CellEngine, KeyedDiffer, RowDiffer, RowKey, RowOperation, Table, TableBuilder,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn rows_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..12, 0..16)
}

fn rows(ids: &[u8]) -> Vec<Value> {
    ids.iter()
        .map(|id| json!({"id": id, "label": format!("row {id}")}))
        .collect()
}

fn keys(ids: &[u8]) -> Vec<RowKey> {
    ids.iter().map(|id| RowKey::from_value(&json!(id))).collect()
}

/// Apply operations to the previous key sequence the way the engine does.
fn replay(previous: &[RowKey], next: &[RowKey], ops: &[RowOperation]) -> Vec<RowKey> {
    let mut working = previous.to_vec();
    for op in ops {
        match (op.adjusted_previous_index, op.current_index) {
            (None, Some(current)) => working.insert(current, next[current].clone()),
            (Some(adjusted), None) => {
                working.remove(adjusted);
            }
            (Some(adjusted), Some(current)) => {
                let key = working.remove(adjusted);
                working.insert(current, key);
            }
            (None, None) => {}
        }
    }
    working
}

proptest! {
    #[test]
    fn prop_diff_replays_to_next(before in rows_strategy(), after in rows_strategy()) {
        let mut differ = KeyedDiffer::new();
        let first = differ.diff_keys(keys(&before));
        prop_assert_eq!(replay(&[], &keys(&before), &first), keys(&before));

        let ops = differ.diff_keys(keys(&after));
        prop_assert_eq!(replay(&keys(&before), &keys(&after), &ops), keys(&after));
        let expected = keys(&after);
        prop_assert_eq!(differ.previous(), expected.as_slice());
    }

    #[test]
    fn prop_unchanged_rows_produce_no_operations(ids in rows_strategy()) {
        let mut differ = KeyedDiffer::new();
        differ.diff_keys(keys(&ids));
        prop_assert!(differ.diff_keys(keys(&ids)).is_empty());
    }

    #[test]
    fn prop_engine_mirrors_rows(before in rows_strategy(), after in rows_strategy()) {
        let spec = TableBuilder::<Value>::for_row_id("id")
            .with_column("id", |c| c)
            .with_column("label", |c| c.sticky())
            .build();
        let model = compile(&Rc::new(spec));
        let identity = model.identity_fn();
        let mut engine = CellEngine::new();
        let mut differ = KeyedDiffer::new();

        for step in [rows(&before), rows(&after)] {
            let ops = differ.diff(&step, &identity);
            engine.apply(&ops, &step, &model);

            let cells = engine.cells();
            prop_assert_eq!(cells.len(), step.len() * 2);
            for (index, row) in step.iter().enumerate() {
                prop_assert_eq!(&cells[index * 2].value, &row["id"].to_string());
                prop_assert_eq!(&cells[index * 2 + 1].value, &row["label"].to_string());
                prop_assert_eq!(&cells[index * 2].cell_id, &format!("{index}-0"));
                prop_assert_eq!(&cells[index * 2 + 1].cell_id, &format!("{index}-1"));
            }
        }
    }

    #[test]
    fn prop_table_cycles_keep_length_invariant(
        steps in prop::collection::vec(rows_strategy(), 1..5)
    ) {
        let spec = TableBuilder::<Value>::for_row_id("id")
            .with_column("id", |c| c)
            .with_column("label", |c| c)
            .with_column("id", |c| c.with_name("again"))
            .build();
        let mut table = Table::new();
        table.set_configuration(Some(Rc::new(spec)));

        for ids in &steps {
            table.set_data(rows(ids));
            prop_assert!(table.check().is_ok());
            let cells = table.cells();
            prop_assert_eq!(cells.len(), ids.len() * 3);
            let firsts: Vec<String> = cells.iter().step_by(3).map(|c| c.value.clone()).collect();
            let expected: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            prop_assert_eq!(firsts, expected);
        }
    }
}
