use super::matching_ids;
use serde_json::Value;
use table_core::{FieldSet, RecordUpdate, Result, Table};
use tracing::info;

/// Field set to `true` on archived records unless overridden.
pub const DEFAULT_ARCHIVE_FIELD: &str = "Archived";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub status_field: String,
    pub status_value: String,
    pub archive_field: String,
}

impl ArchiveOptions {
    pub fn new(status_field: impl Into<String>, status_value: impl Into<String>) -> Self {
        Self {
            status_field: status_field.into(),
            status_value: status_value.into(),
            archive_field: DEFAULT_ARCHIVE_FIELD.to_string(),
        }
    }

    pub fn with_archive_field(mut self, archive_field: impl Into<String>) -> Self {
        self.archive_field = archive_field.into();
        self
    }
}

/// Flag every record whose status matches, in one batched update.
///
/// Returns the ids that were archived.
pub async fn archive_records<T: Table>(table: &mut T, options: &ArchiveOptions) -> Result<Vec<String>> {
    let ids = matching_ids(table, &options.status_field, &options.status_value).await?;
    if ids.is_empty() {
        return Ok(ids);
    }

    let mut fields = FieldSet::new();
    fields.insert(options.archive_field.clone(), Value::Bool(true));
    let updates = ids
        .iter()
        .map(|id| RecordUpdate::new(id.as_str(), fields.clone()))
        .collect();
    table.update_records(updates).await?;

    info!(
        "Archived {} records in '{}' where {} = '{}'",
        ids.len(),
        table.name(),
        options.status_field,
        options.status_value
    );
    Ok(ids)
}
