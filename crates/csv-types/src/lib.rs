//! CSV cell conversions for table-core field values.
//!
//! This crate provides bidirectional conversions between `FieldValue` and
//! the plain text stored in a CSV cell.
//!
//! # Modules
//!
//! - [`forward`] - FieldValue → CSV cell text
//! - [`reverse`] - CSV cell text → inferred FieldValue
//!
//! # Example
//!
//! ```ignore
//! use csv_types::{field_value_to_csv, infer_field_value};
//! use serde_json::json;
//!
//! assert_eq!(field_value_to_csv(&json!([1, 2])), "[1,2]");
//! assert_eq!(infer_field_value("TRUE"), json!(true));
//! ```

pub mod forward;
pub mod reverse;

pub use forward::field_value_to_csv;
pub use reverse::infer_field_value;
