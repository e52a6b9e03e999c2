//! Forward conversion: FieldValue → CSV cell text.

use table_core::{to_comparable_string, FieldValue};

/// Render a field value as cell text.
///
/// Null becomes an empty cell, arrays and objects become JSON text, and
/// scalars use their natural form, so [`crate::infer_field_value`] recovers
/// the same typed value on reload.
pub fn field_value_to_csv(value: &FieldValue) -> String {
    to_comparable_string(value)
}
