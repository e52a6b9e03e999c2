//! Field values and the canonical string coercion.

use crate::error::{HarnessError, Result};
use serde_json::{Map, Value};

/// A single cell value: string, number, boolean, null, array or object.
pub type FieldValue = Value;

/// Mapping of field name to value carried by a record or supplied to a write.
pub type FieldSet = Map<String, Value>;

/// Returned by cell lookups for absent fields.
pub(crate) static NULL: FieldValue = Value::Null;

/// Convert any field value to the string form used for comparison, search and
/// logging.
///
/// - `null` -> `""`
/// - arrays and objects -> compact JSON text
/// - everything else -> its natural string form
///
/// Two objects that serialize to the same JSON compare equal here; this is
/// a simplification, not a hashing guarantee.
pub fn to_comparable_string(value: &FieldValue) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Validate a field set received from outside the process.
///
/// The value must be a JSON object and every key a non-empty name.
pub fn validate_field_set(value: Value) -> Result<FieldSet> {
    match value {
        Value::Object(fields) => {
            check_field_names(&fields)?;
            Ok(fields)
        }
        other => Err(HarnessError::Validation(format!(
            "field set must be an object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Reject field sets containing empty or whitespace-only field names.
pub fn check_field_names(fields: &FieldSet) -> Result<()> {
    match fields.keys().find(|name| name.trim().is_empty()) {
        Some(name) => Err(HarnessError::Validation(format!(
            "field names must not be empty (got {name:?})"
        ))),
        None => Ok(()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
