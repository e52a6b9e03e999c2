//! CLI subcommands and how each one runs against a base.

use crate::connect::BaseTask;
use crate::scripts::{
    archive_records, bulk_update, find_duplicates_by_field, table_stats, ArchiveOptions,
    DEFAULT_ARCHIVE_FIELD,
};
use anyhow::Context;
use async_trait::async_trait;
use clap::Subcommand;
use table_core::{
    to_comparable_string, validate_field_set, Base, FieldSet, HarnessError, Record, SelectOptions,
    SortSpec, Table,
};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the tables of the base
    Tables,

    /// Print the records of a table
    List {
        table: String,

        /// Sort key as `field` or `field:desc`; repeat for secondary keys
        #[arg(long = "sort", value_name = "FIELD[:DIR]")]
        sorts: Vec<String>,
    },

    /// Report records sharing a value (case-insensitive, trimmed)
    Dedupe { table: String, field: String },

    /// Set an archive flag on records with a given status
    Archive {
        table: String,

        #[arg(long)]
        status_field: String,

        #[arg(long)]
        status_value: String,

        #[arg(long, default_value = DEFAULT_ARCHIVE_FIELD)]
        archive_field: String,
    },

    /// Update every record matching a field value
    BulkUpdate {
        table: String,

        #[arg(long)]
        where_field: String,

        #[arg(long)]
        where_value: String,

        /// JSON object of fields to write, e.g. '{"Status": "Done"}'
        #[arg(long = "set", value_name = "JSON")]
        set: String,
    },

    /// Count records per value of a field
    Stats { table: String, field: String },
}

impl Command {
    /// Whether the command needs every table of the base to be known.
    pub fn needs_discovery(&self) -> bool {
        matches!(self, Command::Tables)
    }

    /// Check command input that does not depend on the backend.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self {
            Command::List { sorts, .. } => {
                parse_sorts(sorts)?;
            }
            Command::BulkUpdate { set, .. } => {
                parse_field_set(set)?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl BaseTask for Command {
    /// Lines to print on stdout
    type Output = Vec<String>;

    async fn run<B: Base>(self, base: &mut B) -> anyhow::Result<Vec<String>> {
        match self {
            Command::Tables => Ok(base.table_names()),
            Command::List { table, sorts } => {
                let sorts = parse_sorts(&sorts)?;
                let table = base.get_table(&table)?;
                let mut options = SelectOptions::new();
                for sort in sorts {
                    options = options.sort(sort);
                }
                let result = table.select_records(options).await?;
                let columns: Vec<String> = table.fields().iter().map(|f| f.name.clone()).collect();
                Ok(result
                    .records()
                    .iter()
                    .map(|record| render_record(record, &columns))
                    .collect())
            }
            Command::Dedupe { table, field } => {
                let table = base.get_table(&table)?;
                let report = find_duplicates_by_field(table, &field).await?;
                let mut lines = vec![format!(
                    "{} duplicate records in {} groups",
                    report.duplicate_count,
                    report.groups.len()
                )];
                lines.extend(
                    report
                        .groups
                        .iter()
                        .map(|g| format!("{}: {}", g.key, g.record_ids.join(", "))),
                );
                Ok(lines)
            }
            Command::Archive {
                table,
                status_field,
                status_value,
                archive_field,
            } => {
                let table = base.get_table(&table)?;
                let options =
                    ArchiveOptions::new(status_field, status_value).with_archive_field(archive_field);
                let ids = archive_records(table, &options).await?;
                let mut lines = vec![format!("Archived {} records", ids.len())];
                lines.extend(ids);
                Ok(lines)
            }
            Command::BulkUpdate {
                table,
                where_field,
                where_value,
                set,
            } => {
                let updates = parse_field_set(&set)?;
                let table = base.get_table(&table)?;
                let count = bulk_update(table, &where_field, &where_value, &updates).await?;
                Ok(vec![format!("Updated {count} records")])
            }
            Command::Stats { table, field } => {
                let table = base.get_table(&table)?;
                let stats = table_stats(table, &field).await?;
                let mut lines = vec![format!("Total: {}", stats.total)];
                lines.extend(
                    stats
                        .by_value
                        .iter()
                        .map(|(value, count)| format!("{value}: {count}")),
                );
                lines.push(format!("(empty): {}", stats.empty));
                Ok(lines)
            }
        }
    }
}

fn parse_sorts(specs: &[String]) -> anyhow::Result<Vec<SortSpec>> {
    specs
        .iter()
        .map(|spec| {
            SortSpec::parse(spec).ok_or_else(|| {
                anyhow::Error::from(HarnessError::Validation(format!(
                    "invalid sort '{spec}', expected FIELD or FIELD:asc|desc"
                )))
            })
        })
        .collect()
}

fn parse_field_set(text: &str) -> anyhow::Result<FieldSet> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| HarnessError::Validation(format!("--set is not valid JSON: {e}")))?;
    validate_field_set(value).context("--set must be a JSON object of field names to values")
}

fn render_record<R: Record>(record: &R, columns: &[String]) -> String {
    let mut line = format!("{}\t{}", record.id(), record.name());
    for column in columns {
        let value = record.get_cell_value(column);
        line.push('\t');
        line.push_str(&format!("{column}={}", to_comparable_string(value)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::sample_base;
    use table_core::ErrorKind;

    async fn run(command: Command) -> anyhow::Result<Vec<String>> {
        let mut base = sample_base();
        command.run(&mut base).await
    }

    #[tokio::test]
    async fn test_tables() {
        assert_eq!(run(Command::Tables).await.unwrap(), vec!["Tasks", "Contacts"]);
    }

    #[tokio::test]
    async fn test_list_sorted_descending() {
        let lines = run(Command::List {
            table: "Tasks".to_string(),
            sorts: vec!["Name:desc".to_string()],
        })
        .await
        .unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rec00003\tTask 3"));
        assert!(lines[0].contains("Status=In Progress"));
        assert!(lines[2].starts_with("rec00001\tTask 1"));
    }

    #[tokio::test]
    async fn test_dedupe_sample_contacts() {
        let lines = run(Command::Dedupe {
            table: "Contacts".to_string(),
            field: "Email".to_string(),
        })
        .await
        .unwrap();
        assert_eq!(lines[0], "1 duplicate records in 1 groups");
        assert_eq!(lines[1], "john@x.com: rec00001, rec00002");
    }

    #[tokio::test]
    async fn test_archive_and_stats() {
        let mut base = sample_base();
        let lines = Command::Archive {
            table: "Tasks".to_string(),
            status_field: "Status".to_string(),
            status_value: "Completed".to_string(),
            archive_field: DEFAULT_ARCHIVE_FIELD.to_string(),
        }
        .run(&mut base)
        .await
        .unwrap();
        assert_eq!(lines, vec!["Archived 1 records", "rec00002"]);

        let lines = Command::Stats {
            table: "Tasks".to_string(),
            field: DEFAULT_ARCHIVE_FIELD.to_string(),
        }
        .run(&mut base)
        .await
        .unwrap();
        assert_eq!(lines, vec!["Total: 3", "true: 1", "(empty): 2"]);
    }

    #[tokio::test]
    async fn test_bulk_update() {
        let lines = run(Command::BulkUpdate {
            table: "Tasks".to_string(),
            where_field: "Priority".to_string(),
            where_value: "High".to_string(),
            set: r#"{"Status": "Completed"}"#.to_string(),
        })
        .await
        .unwrap();
        assert_eq!(lines, vec!["Updated 1 records"]);
    }

    #[tokio::test]
    async fn test_unknown_table() {
        let err = run(Command::Stats {
            table: "Projects".to_string(),
            field: "Status".to_string(),
        })
        .await
        .unwrap_err();
        let err = err.downcast::<HarnessError>().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let bad_set = Command::BulkUpdate {
            table: "Tasks".to_string(),
            where_field: "Status".to_string(),
            where_value: "Pending".to_string(),
            set: "[1, 2]".to_string(),
        };
        let err = bad_set.validate().unwrap_err();
        assert_eq!(
            err.downcast_ref::<HarnessError>().map(HarnessError::kind),
            Some(ErrorKind::Validation)
        );

        let bad_json = Command::BulkUpdate {
            table: "Tasks".to_string(),
            where_field: "Status".to_string(),
            where_value: "Pending".to_string(),
            set: "{not json".to_string(),
        };
        assert!(bad_json.validate().is_err());

        let bad_sort = Command::List {
            table: "Tasks".to_string(),
            sorts: vec![":desc".to_string()],
        };
        assert!(bad_sort.validate().is_err());
        assert!(Command::Tables.validate().is_ok());
    }
}
