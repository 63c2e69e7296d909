//! Contract fixture rows and their table configuration.

use std::rc::Rc;

use cellgrid::{
    ExpansionOptions, SelectionMode, SelectionOptions, TableBuilder, TableRow, TableSpec, Width,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const FIXTURE: &str = include_str!("../fixtures/contracts.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub client_name: String,
    pub amount: u32,
    pub society_name: String,
    pub opening_date: String,
    pub closing_date: String,
}

impl TableRow for Contract {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => json!(self.id),
            "client_name" => json!(self.client_name),
            "amount" => json!(self.amount),
            "society_name" => json!(self.society_name),
            "opening_date" => json!(self.opening_date),
            "closing_date" => json!(self.closing_date),
            _ => Value::Null,
        }
    }
}

impl Contract {
    /// Generated contract number `n`, distinct from the fixture ids.
    pub fn generated(n: u32) -> Self {
        Self {
            id: format!("new-{n:03}"),
            client_name: format!("Prospect {n}"),
            amount: 10_000 + (n * 7_919) % 90_000,
            society_name: "Pending".to_string(),
            opening_date: "2026-10-16".to_string(),
            closing_date: "2026-12-31".to_string(),
        }
    }
}

pub fn load() -> serde_json::Result<Vec<Contract>> {
    serde_json::from_str(FIXTURE)
}

fn text(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

pub fn configuration() -> Rc<TableSpec<Contract>> {
    let spec = TableBuilder::<Contract>::for_row_id("id")
        .with_column("amount", |c| {
            c.with_name("Amount")
                .format_with(|v| format!("{:.2} EUR", v.as_f64().unwrap_or_default()))
                .width(Width::Ch(14))
                .sticky()
                .sortable(|rows, _| {
                    let mut sorted = rows.to_vec();
                    sorted.sort_by_key(|c| c.amount);
                    sorted
                })
        })
        .with_column("client_name", |c| c.with_name("Client").format_with(text))
        .with_column("society_name", |c| c.with_name("Society").format_with(text))
        .with_column("opening_date", |c| c.with_name("Opened").format_with(text))
        .with_column("closing_date", |c| c.with_name("Closes").format_with(text).sticky())
        .with_selection(
            SelectionMode::Checkbox,
            SelectionOptions::filter(|c: &Contract| c.amount >= 20_000),
        )
        .expandable(ExpansionOptions::Sticky(false))
        .sticky_header()
        .build();
    Rc::new(spec)
}
