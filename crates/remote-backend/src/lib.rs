//! Remote backend talking to the Airtable REST API.
//!
//! Tables are thin bindings: records are re-fetched on every select and
//! writes go straight to the service, grouped into batches of at most
//! [`MAX_BATCH_SIZE`] records and sent one batch at a time.
//!
//! # Endpoints
//!
//! - `GET    /v0/{base}/{table}` - list records (paged with `offset`)
//! - `POST   /v0/{base}/{table}` - create up to 10 records
//! - `PATCH  /v0/{base}/{table}` - update up to 10 records
//! - `DELETE /v0/{base}/{table}?records[]=...` - delete up to 10 records
//! - `GET    /v0/meta/bases/{base}/tables` - table discovery (needs `schema.bases:read`)

mod base;
mod client;
mod config;
mod record;
mod table;

pub use base::{DiscoveryState, RemoteBase};
pub use client::{RemoteClient, TableSummary, MAX_BATCH_SIZE, PAGE_SIZE, SCHEMA_READ_SCOPE};
pub use config::{RemoteConfig, DEFAULT_API_URL};
pub use record::RemoteRecord;
pub use table::RemoteTable;
