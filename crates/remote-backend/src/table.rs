//! Remote table binding.

use crate::client::{RemoteClient, MAX_BATCH_SIZE};
use crate::record::RemoteRecord;
use async_trait::async_trait;
use std::sync::Arc;
use table_core::{
    apply_select_options, check_field_names, AsRecordId, FieldDescriptor, FieldSet, HarnessError,
    QueryResult, Record, RecordUpdate, Result, SelectOptions, Table,
};
use tracing::debug;

/// A table of the remote base. Owns no records; every select re-fetches.
#[derive(Debug, Clone)]
pub struct RemoteTable {
    id: String,
    name: String,
    client: Arc<RemoteClient>,
}

impl RemoteTable {
    pub fn new(id: impl Into<String>, name: impl Into<String>, client: Arc<RemoteClient>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client,
        }
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[async_trait]
impl Table for RemoteTable {
    type Record = RemoteRecord;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    /// The remote backend cannot introspect field metadata.
    fn fields(&self) -> &[FieldDescriptor] {
        &[]
    }

    /// Always succeeds with a type-less placeholder.
    fn get_field(&self, name_or_id: &str) -> Result<FieldDescriptor> {
        Ok(FieldDescriptor::placeholder(name_or_id))
    }

    async fn select_records(&mut self, options: SelectOptions) -> Result<QueryResult<RemoteRecord>> {
        let records = self
            .client
            .list_records(&self.name, options.fields.as_deref())
            .await?;
        Ok(apply_select_options(records, &options))
    }

    async fn update_record<I>(&mut self, record: &I, fields: FieldSet) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync,
    {
        check_field_names(&fields)?;
        let update = RecordUpdate::new(record.record_id(), fields);
        self.client
            .update_records(&self.name, std::slice::from_ref(&update))
            .await
    }

    async fn update_records(&mut self, updates: Vec<RecordUpdate>) -> Result<()> {
        for update in &updates {
            check_field_names(&update.fields)?;
        }
        for batch in updates.chunks(MAX_BATCH_SIZE) {
            debug!("Updating {} records of '{}'", batch.len(), self.name);
            self.client.update_records(&self.name, batch).await?;
        }
        Ok(())
    }

    async fn create_record(&mut self, fields: FieldSet) -> Result<String> {
        let mut ids = self.create_records(vec![fields]).await?;
        ids.pop().ok_or_else(|| HarnessError::Remote {
            status: None,
            message: format!("create in '{}' returned no record", self.name),
        })
    }

    async fn create_records(&mut self, batch: Vec<FieldSet>) -> Result<Vec<String>> {
        for fields in &batch {
            check_field_names(fields)?;
        }
        let mut ids = Vec::with_capacity(batch.len());
        for chunk in batch.chunks(MAX_BATCH_SIZE) {
            debug!("Creating {} records in '{}'", chunk.len(), self.name);
            let created = self.client.create_records(&self.name, chunk).await?;
            ids.extend(created.iter().map(|r| r.id().to_string()));
        }
        Ok(ids)
    }

    async fn delete_record<I>(&mut self, record: &I) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync,
    {
        self.client
            .delete_records(&self.name, &[record.record_id().to_string()])
            .await
    }

    async fn delete_records(&mut self, ids: Vec<String>) -> Result<()> {
        for batch in ids.chunks(MAX_BATCH_SIZE) {
            debug!("Deleting {} records of '{}'", batch.len(), self.name);
            self.client.delete_records(&self.name, batch).await?;
        }
        Ok(())
    }
}
