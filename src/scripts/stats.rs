use std::collections::BTreeMap;
use table_core::{Record, Result, SelectOptions, Table};

/// Value distribution of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStats {
    pub total: usize,
    pub by_value: BTreeMap<String, usize>,
    /// Records whose value is null or blank
    pub empty: usize,
}

/// Count records per distinct value of `group_field`.
pub async fn table_stats<T: Table>(table: &mut T, group_field: &str) -> Result<TableStats> {
    let result = table
        .select_records(SelectOptions::new().fields([group_field]))
        .await?;

    let mut stats = TableStats {
        total: result.len(),
        ..TableStats::default()
    };
    for record in result.records() {
        let value = record.get_cell_value_as_string(group_field);
        if value.trim().is_empty() {
            stats.empty += 1;
        } else {
            *stats.by_value.entry(value).or_default() += 1;
        }
    }
    Ok(stats)
}
