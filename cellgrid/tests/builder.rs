use std::rc::Rc;

use cellgrid::{
    ExpansionOptions, SelectionMode, SelectionOptions, TableBuilder, TableRow, TableSpec, Width,
};
use serde_json::{json, Value};

fn five_columns(sticky: [bool; 5]) -> TableSpec<Value> {
    let mut builder = TableBuilder::<Value>::for_row_id("id");
    for (field, sticky) in ["a", "b", "c", "d", "e"].into_iter().zip(sticky) {
        builder = builder.with_column(field, |c| if sticky { c.sticky() } else { c });
    }
    builder.build()
}

fn sticky_flags(spec: &TableSpec<Value>) -> Vec<(bool, bool)> {
    spec.columns()
        .iter()
        .map(|c| (c.sticky_left(), c.sticky_right()))
        .collect()
}

// ============================================================================
// Column Defaults
// ============================================================================

#[test]
fn test_column_defaults() {
    let spec = TableBuilder::<Value>::for_row_id("id")
        .with_column("name", |c| c)
        .build();

    let column = &spec.columns()[0];
    assert_eq!(column.field(), "name");
    assert_eq!(column.name(), "name", "display name defaults to the field");
    assert!(!column.is_sortable());
    assert_eq!(column.width(), None);
    assert_eq!(column.format(&json!("x")), "\"x\"", "JSON stringifier by default");
    assert_eq!(column.format(&json!(42)), "42");
    assert_eq!(column.format(&Value::Null), "null");
}

#[test]
fn test_column_configuration() {
    let spec = TableBuilder::<Value>::for_row_id("id")
        .with_column("price", |c| {
            c.with_name("Price")
                .format_with(|v| format!("${}", v.as_f64().unwrap_or_default()))
                .width(Width::Px(120))
                .sortable(|rows, field| {
                    let mut sorted = rows.to_vec();
                    sorted.sort_by(|a, b| {
                        a.field(field)
                            .as_f64()
                            .partial_cmp(&b.field(field).as_f64())
                            .unwrap()
                    });
                    sorted
                })
        })
        .build();

    let column = &spec.columns()[0];
    assert_eq!(column.name(), "Price");
    assert_eq!(column.format(&json!(9.5)), "$9.5");
    assert_eq!(column.width(), Some(Width::Px(120)));
    assert!(column.is_sortable());

    let rows = vec![json!({"price": 3}), json!({"price": 1}), json!({"price": 2})];
    let sort = column.sort_fn().unwrap();
    let sorted = sort(&rows, column.field());
    let prices: Vec<Value> = sorted.iter().map(|r| r.field("price")).collect();
    assert_eq!(prices, vec![json!(1), json!(2), json!(3)]);
}

#[test]
fn test_duplicate_fields_get_distinct_columns() {
    let spec = TableBuilder::<Value>::for_row_id("id")
        .with_column("name", |c| c.with_name("First"))
        .with_column("name", |c| c.with_name("Second"))
        .with_column("name", |c| c.with_name("Third"))
        .build();

    let ids: Vec<_> = spec.columns().iter().map(|c| c.id()).collect();
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    assert_ne!(ids[0], ids[2]);
}

#[test]
fn test_rebuilt_spec_gets_new_column_ids() {
    let first = five_columns([false; 5]);
    let second = five_columns([false; 5]);
    assert_ne!(first.columns()[0].id(), second.columns()[0].id());
}

// ============================================================================
// Sticky Resolution
// ============================================================================

#[test]
fn test_sticky_middle_column_pins_both_edges() {
    let spec = five_columns([false, false, true, false, false]);
    assert_eq!(
        sticky_flags(&spec),
        vec![
            (true, false),
            (true, false),
            (true, true),
            (false, true),
            (false, true)
        ]
    );
}

#[test]
fn test_all_sticky_collapses_to_none() {
    let spec = five_columns([true; 5]);
    assert_eq!(sticky_flags(&spec), vec![(false, false); 5]);
    assert!(spec.columns().iter().all(|c| !c.is_sticky()));
}

#[test]
fn test_no_sticky_leaves_flags_unset() {
    let spec = five_columns([false; 5]);
    assert_eq!(sticky_flags(&spec), vec![(false, false); 5]);
}

#[test]
fn test_outer_and_inner_boundary_agree() {
    // Marking the edge column or the boundary column pins the same set.
    let outer = five_columns([true, false, false, false, true]);
    assert_eq!(
        sticky_flags(&outer),
        vec![
            (true, false),
            (false, false),
            (false, false),
            (false, false),
            (false, true)
        ]
    );

    let inner = five_columns([false, true, false, true, false]);
    assert_eq!(
        sticky_flags(&inner),
        vec![
            (true, false),
            (true, false),
            (false, false),
            (false, true),
            (false, true)
        ]
    );
}

#[test]
fn test_duplicate_field_columns_resolve_independently() {
    let spec = TableBuilder::<Value>::for_row_id("id")
        .with_column("name", |c| c.sticky())
        .with_column("name", |c| c)
        .with_column("name", |c| c)
        .build();

    assert_eq!(
        sticky_flags(&spec),
        vec![(true, false), (false, false), (false, false)]
    );
}

// ============================================================================
// Selection & Expansion Options
// ============================================================================

#[test]
fn test_table_defaults() {
    let spec = TableBuilder::<Value>::for_row_id("id").build();
    assert_eq!(spec.row_id_field(), "id");
    assert_eq!(spec.selection_mode(), SelectionMode::None);
    assert!(spec.sticky_selection());
    assert!(spec.sticky_expandable());
    assert!(!spec.expandable());
    assert!(!spec.sticky_header());
    assert!(!spec.sticky_footer());
    assert!(spec.can_select(&json!({"id": 1})));
}

#[test]
fn test_selection_options() {
    let sticky_only = TableBuilder::<Value>::for_row_id("id")
        .with_selection(SelectionMode::Radio, SelectionOptions::Sticky(false))
        .build();
    assert_eq!(sticky_only.selection_mode(), SelectionMode::Radio);
    assert!(!sticky_only.sticky_selection());

    let filtered = TableBuilder::<Value>::for_row_id("id")
        .with_selection(
            SelectionMode::Checkbox,
            SelectionOptions::filter(|row: &Value| row.field("active") == json!(true)),
        )
        .build();
    assert!(filtered.sticky_selection(), "a filter alone keeps the column sticky");
    assert!(filtered.can_select(&json!({"active": true})));
    assert!(!filtered.can_select(&json!({"active": false})));

    let both = TableBuilder::<Value>::for_row_id("id")
        .with_selection(
            SelectionMode::Checkbox,
            SelectionOptions::FilterAndSticky(Rc::new(|_: &Value| false), false),
        )
        .build();
    assert!(!both.sticky_selection());
    assert!(!both.can_select(&json!({})));
}

#[test]
fn test_expansion_options() {
    let default = TableBuilder::<Value>::for_row_id("id")
        .expandable(ExpansionOptions::Unset)
        .build();
    assert!(default.expandable());
    assert!(default.sticky_expandable());
    let row = json!({"id": 1, "detail": "x"});
    assert_eq!(default.expand(&row), row, "expands to the row itself");

    let unpinned = TableBuilder::<Value>::for_row_id("id")
        .expandable(ExpansionOptions::Sticky(false))
        .build();
    assert!(!unpinned.sticky_expandable());

    let custom = TableBuilder::<Value>::for_row_id("id")
        .expandable(ExpansionOptions::with(|row: &Value| row.field("detail")))
        .build();
    assert!(custom.sticky_expandable());
    assert_eq!(custom.expand(&row), json!("x"));
}

#[test]
fn test_sticky_header_and_footer() {
    let spec = TableBuilder::<Value>::for_row_id("id")
        .sticky_footer()
        .sticky_header()
        .build();
    assert!(spec.sticky_header());
    assert!(spec.sticky_footer());
}
