//! Business-logic scripts written against the shared table contract.
//!
//! Every script is generic over [`table_core::Table`], so the same code runs
//! unchanged against the remote API, a CSV mirror, or the in-memory mock.

mod archive;
mod bulk_update;
mod dedupe;
mod stats;

pub use archive::{archive_records, ArchiveOptions, DEFAULT_ARCHIVE_FIELD};
pub use bulk_update::bulk_update;
pub use dedupe::{find_duplicates_by_field, DuplicateGroup, DuplicateReport};
pub use stats::{table_stats, TableStats};

use table_core::{Record, Result, SelectOptions, Table};

/// Ids of every record whose `field` renders as exactly `value`.
async fn matching_ids<T: Table>(table: &mut T, field: &str, value: &str) -> Result<Vec<String>> {
    let result = table.select_records(SelectOptions::new()).await?;
    Ok(result
        .records()
        .iter()
        .filter(|r| r.get_cell_value_as_string(field) == value)
        .map(|r| r.id().to_string())
        .collect())
}
