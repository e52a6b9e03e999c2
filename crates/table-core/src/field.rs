//! Field metadata.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};

/// Type given to every column the local backends cannot say more about.
pub const DEFAULT_FIELD_TYPE: &str = "singleLineText";

/// Describes one declared field of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field identifier (equal to the name for CSV-backed tables)
    pub id: String,

    /// Field name as used in field sets
    pub name: String,

    /// Declared type, `None` when the backend cannot introspect it
    #[serde(rename = "type")]
    pub field_type: Option<String>,

    /// Type-specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl FieldDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type: Some(field_type.into()),
            options: None,
        }
    }

    /// A generic text field whose id is its name.
    pub fn text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, DEFAULT_FIELD_TYPE)
    }

    /// A type-less descriptor for backends without metadata access.
    pub fn placeholder(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            field_type: None,
            options: None,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn matches(&self, name_or_id: &str) -> bool {
        self.name == name_or_id || self.id == name_or_id
    }
}

/// Look up a declared field by name or id.
pub fn find_field(
    fields: &[FieldDescriptor],
    table: &str,
    name_or_id: &str,
) -> Result<FieldDescriptor> {
    fields
        .iter()
        .find(|f| f.matches(name_or_id))
        .cloned()
        .ok_or_else(|| HarnessError::FieldNotFound {
            table: table.to_string(),
            field: name_or_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_field_by_name_or_id() {
        let fields = vec![
            FieldDescriptor::new("fldName", "Name", DEFAULT_FIELD_TYPE),
            FieldDescriptor::text("Status"),
        ];
        assert_eq!(find_field(&fields, "Tasks", "Name").unwrap().id, "fldName");
        assert_eq!(find_field(&fields, "Tasks", "fldName").unwrap().name, "Name");
        assert_eq!(find_field(&fields, "Tasks", "Status").unwrap().id, "Status");

        let err = find_field(&fields, "Tasks", "Priority").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Priority"));
    }

    #[test]
    fn test_placeholder_has_no_type() {
        let field = FieldDescriptor::placeholder("Anything");
        assert_eq!(field.name, "Anything");
        assert!(field.field_type.is_none());
    }
}
