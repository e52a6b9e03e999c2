//! airtable-harness
//!
//! Run Airtable-style base scripts against one of three interchangeable
//! backends:
//!
//! - **remote**: the Airtable REST API (`AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID`)
//! - **csv**: a directory of CSV files, one per table (`CSV_DATA_DIR`)
//! - **mock**: an in-memory sample base that records every call
//!
//! Scripts in [`scripts`] are generic over [`table_core::Table`], so the same
//! logic runs unchanged against any of them.
//!
//! # CLI Usage
//!
//! ```bash
//! # Which tables does the base have?
//! airtable-harness tables
//!
//! # Records sorted by status, then name descending
//! CSV_DATA_DIR=./data airtable-harness list Tasks --sort Status --sort Name:desc
//!
//! # Duplicate contacts by e-mail
//! airtable-harness dedupe Contacts Email
//!
//! # Dry run against the CSV mirror without touching the files
//! CSV_DATA_DIR=./data CSV_AUTO_SAVE=false airtable-harness archive Tasks \
//!   --status-field Status --status-value Completed
//! ```

pub mod commands;
pub mod config;
pub mod connect;
pub mod scripts;

pub use commands::Command;
pub use config::{BackendConfig, BackendKind, ConfigArgs, HarnessConfig};
pub use connect::{connect, run_with_backend, sample_base, Backend, BaseTask};
