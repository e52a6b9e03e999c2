//! CSV mirror backend.
//!
//! A directory of CSV files stands in for an Airtable base: every `*.csv`
//! file is a table named after the file stem. The first row holds column
//! headers; a column named `id` (any case) holds record ids and every other
//! column is a field. Cell text is converted to typed values once at load
//! time and written back in full on save.

mod base;
mod config;
mod table;

pub use base::CsvBase;
pub use config::CsvConfig;
pub use table::{CsvRecord, CsvTable};
