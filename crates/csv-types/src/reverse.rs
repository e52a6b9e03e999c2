//! Reverse conversion: CSV cell text → inferred FieldValue.

use serde_json::{Number, Value};
use table_core::FieldValue;

/// Infer the richest value a cell's text represents.
///
/// Precedence:
/// 1. empty text → `null`
/// 2. `true`/`false` in any case → boolean
/// 3. text parsing as a finite number (ignoring surrounding whitespace) → number
/// 4. text fully wrapped in `[...]` or `{...}` that parses as JSON → that structure
/// 5. anything else → the raw string
pub fn infer_field_value(text: &str) -> FieldValue {
    if text.is_empty() {
        return Value::Null;
    }

    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if let Some(number) = parse_number(text) {
        return Value::Number(number);
    }

    if is_json_delimited(text) {
        if let Ok(parsed) = serde_json::from_str::<Value>(text) {
            return parsed;
        }
    }

    Value::String(text.to_string())
}

fn parse_number(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::from(i));
    }
    // "inf" and "nan" parse as f64 but are not numbers a cell should become
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
}

fn is_json_delimited(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('{') && trimmed.ends_with('}'))
}
