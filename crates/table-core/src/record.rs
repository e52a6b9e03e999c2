//! The record contract and the record type owned by local backends.

use crate::values::{to_comparable_string, FieldSet, FieldValue, NULL};

/// Conventional field from which a record's display name is derived.
pub const NAME_FIELD: &str = "Name";

/// One data row: stable identifier, display name and field map.
///
/// Implemented by [`LocalRecord`] (CSV and in-memory backends) and by the
/// remote backend's read-through record.
pub trait Record: Clone + std::fmt::Debug + Send + Sync {
    /// Stable identifier, immutable after creation.
    fn id(&self) -> &str;

    /// Display name: the `Name` field, falling back to the id.
    fn name(&self) -> &str;

    /// Direct field lookup. Absent and explicitly-null fields are both `null`.
    fn get_cell_value(&self, field: &str) -> &FieldValue;

    /// String form of a cell, never failing; `""` for absent or null values.
    fn get_cell_value_as_string(&self, field: &str) -> String {
        to_comparable_string(self.get_cell_value(field))
    }
}

/// Derive the display name from a field set.
pub fn display_name(id: &str, fields: &FieldSet) -> String {
    match fields.get(NAME_FIELD) {
        None | Some(FieldValue::Null) => id.to_string(),
        Some(value) => {
            let name = to_comparable_string(value);
            if name.is_empty() {
                id.to_string()
            } else {
                name
            }
        }
    }
}

/// A record whose fields are held locally and mutated in place by its
/// owning table.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalRecord {
    id: String,
    name: String,
    fields: FieldSet,
}

impl LocalRecord {
    pub fn new(id: impl Into<String>, fields: FieldSet) -> Self {
        let id = id.into();
        let name = display_name(&id, &fields);
        Self { id, name, fields }
    }

    /// Every field currently held, for persistence.
    pub fn snapshot(&self) -> &FieldSet {
        &self.fields
    }

    /// Replace a subset of fields, re-deriving the name when `Name` changes.
    pub(crate) fn apply_fields(&mut self, fields: FieldSet) {
        let renamed = fields.contains_key(NAME_FIELD);
        self.fields.extend(fields);
        if renamed {
            self.name = display_name(&self.id, &self.fields);
        }
    }
}

impl Record for LocalRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_cell_value(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FieldSet {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_name_derivation() {
        let record = LocalRecord::new("rec00001", fields(json!({"Name": "Task 1"})));
        assert_eq!(record.name(), "Task 1");

        let record = LocalRecord::new("rec00002", fields(json!({"Status": "Done"})));
        assert_eq!(record.name(), "rec00002");

        let record = LocalRecord::new("rec00003", fields(json!({"Name": null})));
        assert_eq!(record.name(), "rec00003");
    }

    #[test]
    fn test_name_follows_updates() {
        let mut record = LocalRecord::new("rec00001", fields(json!({"Name": "Old"})));
        record.apply_fields(fields(json!({"Status": "Done"})));
        assert_eq!(record.name(), "Old");
        record.apply_fields(fields(json!({"Name": "New"})));
        assert_eq!(record.name(), "New");
        assert_eq!(record.get_cell_value("Status"), &json!("Done"));
    }

    #[test]
    fn test_absent_cells_are_null() {
        let record = LocalRecord::new("rec00001", fields(json!({"Empty": null})));
        assert!(record.get_cell_value("Missing").is_null());
        assert!(record.get_cell_value("Empty").is_null());
        assert_eq!(record.get_cell_value_as_string("Missing"), "");
    }

    #[test]
    fn test_cell_as_string_is_total() {
        let record = LocalRecord::new(
            "rec00001",
            fields(json!({
                "Tags": ["a", "b"],
                "Meta": {"k": 1},
                "Count": 3,
                "Done": false,
            })),
        );
        assert_eq!(record.get_cell_value_as_string("Tags"), r#"["a","b"]"#);
        assert_eq!(record.get_cell_value_as_string("Meta"), r#"{"k":1}"#);
        assert_eq!(record.get_cell_value_as_string("Count"), "3");
        assert_eq!(record.get_cell_value_as_string("Done"), "false");
    }
}
