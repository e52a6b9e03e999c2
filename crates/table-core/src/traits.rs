//! Capability traits every backend implements.
//!
//! Scripts are written against these traits and use generics for dispatch:
//!
//! ```ignore
//! pub async fn close_all<T: Table>(table: &mut T) -> Result<()> {
//!     let result = table.select_records(SelectOptions::new()).await?;
//!     let updates = result
//!         .records()
//!         .iter()
//!         .map(|r| RecordUpdate::new(r.id(), fields.clone()))
//!         .collect();
//!     table.update_records(updates).await
//! }
//! ```
//!
//! The CLI branches once on the configured backend, and everything after
//! that is monomorphized for the concrete implementation.

use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::query::{QueryResult, SelectOptions};
use crate::record::{LocalRecord, Record};
use crate::values::FieldSet;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Anything that names a record: an id string or the record itself.
pub trait AsRecordId {
    fn record_id(&self) -> &str;
}

impl AsRecordId for str {
    fn record_id(&self) -> &str {
        self
    }
}

impl AsRecordId for String {
    fn record_id(&self) -> &str {
        self
    }
}

impl AsRecordId for LocalRecord {
    fn record_id(&self) -> &str {
        self.id()
    }
}

/// One entry of a batched update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub id: String,
    pub fields: FieldSet,
}

impl RecordUpdate {
    pub fn new(id: impl Into<String>, fields: FieldSet) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// A named collection of records owning all mutation operations.
///
/// Every async method is one logical round trip to the backend. Batched
/// variants behave like awaiting the single-record variant for each entry
/// in order: the first failure aborts the remaining entries and earlier
/// entries stay applied.
#[async_trait]
pub trait Table: Send + Sync {
    type Record: Record;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Declared fields, in declaration order.
    fn fields(&self) -> &[FieldDescriptor];

    /// Look up a declared field by name or id.
    fn get_field(&self, name_or_id: &str) -> Result<FieldDescriptor>;

    /// List records. Always returns a result, possibly empty.
    async fn select_records(&mut self, options: SelectOptions) -> Result<QueryResult<Self::Record>>;

    async fn update_record<I>(&mut self, record: &I, fields: FieldSet) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync;

    async fn update_records(&mut self, updates: Vec<RecordUpdate>) -> Result<()> {
        for update in updates {
            self.update_record(update.id.as_str(), update.fields).await?;
        }
        Ok(())
    }

    /// Create a record and return its new id.
    async fn create_record(&mut self, fields: FieldSet) -> Result<String>;

    /// Create records, returning ids in input order.
    async fn create_records(&mut self, batch: Vec<FieldSet>) -> Result<Vec<String>> {
        let mut ids = Vec::with_capacity(batch.len());
        for fields in batch {
            ids.push(self.create_record(fields).await?);
        }
        Ok(ids)
    }

    async fn delete_record<I>(&mut self, record: &I) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync;

    async fn delete_records(&mut self, ids: Vec<String>) -> Result<()> {
        for id in ids {
            self.delete_record(id.as_str()).await?;
        }
        Ok(())
    }
}

/// A named collection of tables.
pub trait Base: Send + Sync {
    type Table: Table;

    /// Base identifier.
    fn id(&self) -> &str;

    /// Every table known so far, in discovery order.
    fn tables(&self) -> &[Self::Table];

    /// Resolve a table by name or id.
    fn get_table(&mut self, name_or_id: &str) -> Result<&mut Self::Table>;

    fn table_names(&self) -> Vec<String> {
        self.tables().iter().map(|t| t.name().to_string()).collect()
    }
}
