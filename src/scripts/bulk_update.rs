use super::matching_ids;
use table_core::{check_field_names, FieldSet, RecordUpdate, Result, Table};
use tracing::info;

/// Apply `updates` to every record whose `filter_field` equals `filter_value`.
///
/// Returns the number of records updated.
pub async fn bulk_update<T: Table>(
    table: &mut T,
    filter_field: &str,
    filter_value: &str,
    updates: &FieldSet,
) -> Result<usize> {
    check_field_names(updates)?;
    let ids = matching_ids(table, filter_field, filter_value).await?;
    if ids.is_empty() {
        return Ok(0);
    }

    let count = ids.len();
    let batch = ids
        .into_iter()
        .map(|id| RecordUpdate::new(id, updates.clone()))
        .collect();
    table.update_records(batch).await?;

    info!("Updated {count} records in '{}'", table.name());
    Ok(count)
}
