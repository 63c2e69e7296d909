//! TableRow trait and row identity.

use std::fmt;

use serde_json::{Map, Value};

/// Trait for records that can be projected into table cells.
///
/// # Example
///
/// ```
/// use cellgrid::TableRow;
/// use serde_json::{json, Value};
///
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "id" => json!(self.id),
///             "name" => json!(self.name),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + 'static {
    /// Raw value of the named field, `Value::Null` when the record has none.
    fn field(&self, key: &str) -> Value;
}

impl TableRow for Value {
    fn field(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }
}

impl TableRow for Map<String, Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }
}

/// Identity of a row across updates.
///
/// Holds the canonical JSON text of the row-id field, so `1` and `"1"` are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(String);

impl RowKey {
    /// Build a key from a raw field value.
    pub fn from_value(value: &Value) -> Self {
        Self(value.to_string())
    }

    /// Key of `row` for the given id field.
    pub fn of<T: TableRow>(row: &T, id_field: &str) -> Self {
        Self::from_value(&row.field(id_field))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Value> for RowKey {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
