//! Mock table holding records in memory.

use crate::call_log::{CallLog, RecordedCall};
use async_trait::async_trait;
use table_core::{
    check_field_names, find_field, AsRecordId, FieldDescriptor, FieldSet, LocalRecord,
    QueryResult, RecordStore, RecordUpdate, Result, SelectOptions, Table,
};
use tracing::debug;

/// Records of the in-memory backend.
pub type MemoryRecord = LocalRecord;

/// A table that exists only in memory and records every call made on it.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    name: String,
    fields: Vec<FieldDescriptor>,
    store: RecordStore,
    seeded: Vec<(Option<String>, FieldSet)>,
    calls: CallLog,
}

impl MemoryTable {
    /// Create an empty table with the placeholder `Name`/`Notes` fields.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            store: RecordStore::new(name.clone()),
            name,
            fields: vec![FieldDescriptor::text("Name"), FieldDescriptor::text("Notes")],
            seeded: Vec::new(),
            calls: CallLog::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    /// Seed a record under an explicit id.
    pub fn with_record(self, id: impl Into<String>, fields: FieldSet) -> Self {
        self.seed([(Some(id.into()), fields)])
    }

    /// Seed records, synthesizing their ids.
    pub fn with_records(self, records: impl IntoIterator<Item = FieldSet>) -> Self {
        self.seed(records.into_iter().map(|fields| (None, fields)))
    }

    /// Rebuild the store from every seeded row so explicit ids are claimed
    /// before any id is synthesized, whatever order the builders ran in.
    fn seed(mut self, rows: impl IntoIterator<Item = (Option<String>, FieldSet)>) -> Self {
        self.seeded.extend(rows);
        self.store = RecordStore::new(self.name.clone());
        self.store.insert_rows(self.seeded.iter().cloned());
        self
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    /// Forget recorded calls, keeping the data.
    pub fn reset_calls(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Current records, in insertion order.
    pub fn records(&self) -> &[MemoryRecord] {
        self.store.records()
    }
}

#[async_trait]
impl Table for MemoryTable {
    type Record = MemoryRecord;

    fn id(&self) -> &str {
        &self.name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn get_field(&self, name_or_id: &str) -> Result<FieldDescriptor> {
        find_field(&self.fields, &self.name, name_or_id)
    }

    async fn select_records(&mut self, options: SelectOptions) -> Result<QueryResult<MemoryRecord>> {
        self.calls.record(RecordedCall::Select(options.clone()));
        Ok(self.store.select(&options))
    }

    async fn update_record<I>(&mut self, record: &I, fields: FieldSet) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync,
    {
        let id = record.record_id();
        self.calls.record(RecordedCall::Update {
            id: id.to_string(),
            fields: fields.clone(),
        });
        check_field_names(&fields)?;
        self.store.update(id, fields)
    }

    async fn update_records(&mut self, updates: Vec<RecordUpdate>) -> Result<()> {
        self.calls.record(RecordedCall::UpdateMany(updates.clone()));
        for update in updates {
            check_field_names(&update.fields)?;
            self.store.update(&update.id, update.fields)?;
        }
        Ok(())
    }

    async fn create_record(&mut self, fields: FieldSet) -> Result<String> {
        self.calls.record(RecordedCall::Create(fields.clone()));
        check_field_names(&fields)?;
        let id = self.store.insert(None, fields);
        debug!("Created mock record {id} in '{}'", self.name);
        Ok(id)
    }

    async fn create_records(&mut self, batch: Vec<FieldSet>) -> Result<Vec<String>> {
        self.calls.record(RecordedCall::CreateMany(batch.clone()));
        let mut ids = Vec::with_capacity(batch.len());
        for fields in batch {
            check_field_names(&fields)?;
            ids.push(self.store.insert(None, fields));
        }
        Ok(ids)
    }

    async fn delete_record<I>(&mut self, record: &I) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync,
    {
        let id = record.record_id();
        self.calls.record(RecordedCall::Delete(id.to_string()));
        self.store.delete(id)
    }

    async fn delete_records(&mut self, ids: Vec<String>) -> Result<()> {
        self.calls.record(RecordedCall::DeleteMany(ids.clone()));
        for id in &ids {
            self.store.delete(id)?;
        }
        Ok(())
    }
}
