//! Record abstraction for table rows

use serde_json::Map;

use super::value::Value;

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Bool,
    DateTime,
    List,
}

/// One entry of a record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A row that columns can read fields from.
///
/// `schema` declares the fields a row type exposes. An empty schema marks an
/// open record whose fields are only known at runtime.
pub trait Record {
    fn schema() -> &'static [FieldSpec]
    where
        Self: Sized;

    /// Value of a field, `None` when the row has no such field
    fn field(&self, accessor: &str) -> Option<Value>;

    /// Stable identity used as the row key when present
    fn row_id(&self) -> Option<i64> {
        self.field("id").and_then(|v| v.as_i64())
    }
}

/// Look up a field in a schema
pub fn schema_field<R: Record>(accessor: &str) -> Option<&'static FieldSpec> {
    R::schema().iter().find(|f| f.name == accessor)
}

/// Resolve a field, folding explicit nulls into absence
pub fn resolve<R: Record>(row: &R, accessor: &str) -> Option<Value> {
    row.field(accessor).filter(|v| !v.is_null())
}

/// Row with a dynamic shape, backed by a JSON object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRow(pub Map<String, serde_json::Value>);

impl JsonRow {
    pub fn new(map: Map<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

impl From<serde_json::Value> for JsonRow {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl Record for JsonRow {
    fn schema() -> &'static [FieldSpec] {
        &[]
    }

    fn field(&self, accessor: &str) -> Option<Value> {
        self.0.get(accessor).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_row_resolves_present_fields() {
        let row = JsonRow::from(json!({"id": 7, "name": "Cora"}));
        assert_eq!(resolve(&row, "name"), Some(Value::from("Cora")));
        assert_eq!(row.row_id(), Some(7));
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let row = JsonRow::from(json!({"email": null}));
        assert_eq!(resolve(&row, "email"), None);
        assert_eq!(resolve(&row, "nope"), None);
        assert_eq!(row.row_id(), None);
    }

    #[test]
    fn non_object_json_is_empty_row() {
        let row = JsonRow::from(json!([1, 2]));
        assert!(row.0.is_empty());
    }
}
