//! Core types shared by every airtable-harness backend.
//!
//! A script written against the [`Base`], [`Table`] and [`Record`] traits
//! runs unchanged against the remote API, the CSV mirror, or the in-memory
//! mock. This crate holds everything those backends agree on:
//!
//! - [`values`] - field values and the canonical string coercion
//! - [`record`] - the `Record` contract and the locally-owned record type
//! - [`query`] - select options, the stable multi-key sort, `QueryResult`
//! - [`field`] - field descriptors
//! - [`store`] - ordered record storage used by the local backends
//! - [`traits`] - the `Table` and `Base` capability traits
//! - [`error`] - the error taxonomy scripts branch on
//!
//! # Architecture
//!
//! ```text
//! table-core (this crate)
//!    │
//!    ├─── csv-types        (cell text <-> FieldValue)
//!    ├─── csv-backend      (directory of CSV files, optional auto-save)
//!    ├─── memory-backend   (pure simulation with a call log)
//!    └─── remote-backend   (HTTP API, paging and write batches)
//! ```

pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod store;
pub mod traits;
pub mod values;

pub use error::{ErrorKind, HarnessError, Result};
pub use field::{find_field, FieldDescriptor, DEFAULT_FIELD_TYPE};
pub use query::{apply_select_options, sort_records, QueryResult, SelectOptions, SortDirection, SortSpec};
pub use record::{display_name, LocalRecord, Record, NAME_FIELD};
pub use store::{RecordStore, RECORD_ID_PREFIX};
pub use traits::{AsRecordId, Base, RecordUpdate, Table};
pub use values::{check_field_names, to_comparable_string, validate_field_set, FieldSet, FieldValue};
