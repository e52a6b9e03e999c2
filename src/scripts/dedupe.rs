use std::collections::HashMap;
use table_core::{Record, Result, SelectOptions, Table};
use tracing::debug;

/// Records sharing one normalized key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Trimmed, lower-cased field value
    pub key: String,
    /// Record ids in table order
    pub record_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// Groups with more than one record, in first-seen order
    pub groups: Vec<DuplicateGroup>,
    /// Records beyond the first of each group
    pub duplicate_count: usize,
}

/// Group records whose `field` matches case-insensitively after trimming.
///
/// Records with an empty value never form a group.
pub async fn find_duplicates_by_field<T: Table>(table: &mut T, field: &str) -> Result<DuplicateReport> {
    let result = table
        .select_records(SelectOptions::new().fields([field]))
        .await?;

    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in result.records() {
        let key = record.get_cell_value_as_string(field).trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match index.get(&key) {
            Some(&pos) => groups[pos].record_ids.push(record.id().to_string()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DuplicateGroup {
                    key,
                    record_ids: vec![record.id().to_string()],
                });
            }
        }
    }

    groups.retain(|g| g.record_ids.len() > 1);
    let duplicate_count = groups.iter().map(|g| g.record_ids.len() - 1).sum();
    debug!(
        "Found {} duplicate groups on '{field}' in '{}'",
        groups.len(),
        table.name()
    );
    Ok(DuplicateReport {
        groups,
        duplicate_count,
    })
}
