//! The same scripts must observe the same data through every local backend.

use airtable_harness::scripts::{
    archive_records, bulk_update, find_duplicates_by_field, table_stats, ArchiveOptions,
};
use airtable_harness_csv_backend::{CsvBase, CsvConfig};
use airtable_harness_memory_backend::{MemoryBase, MemoryTable};
use serde_json::{json, Value};
use table_core::{Base, FieldSet, Record, SelectOptions, SortSpec, Table};
use tempfile::TempDir;

const CONTACTS_CSV: &str = "\
id,Name,Email,Status,Score
rec00001,John,john@x.com,Active,10
rec00002,J. Smith,JOHN@X.COM,Inactive,7
rec00003,Jane,jane@x.com,Active,9
rec00004,Jim,,Inactive,
rec00005,Janet, jane@x.com ,Active,3
";

fn row(value: Value) -> FieldSet {
    value.as_object().cloned().unwrap()
}

fn memory_base() -> MemoryBase {
    let contacts = MemoryTable::new("Contacts").with_records([
        row(json!({"Name": "John", "Email": "john@x.com", "Status": "Active", "Score": 10})),
        row(json!({"Name": "J. Smith", "Email": "JOHN@X.COM", "Status": "Inactive", "Score": 7})),
        row(json!({"Name": "Jane", "Email": "jane@x.com", "Status": "Active", "Score": 9})),
        row(json!({"Name": "Jim", "Email": null, "Status": "Inactive", "Score": null})),
        row(json!({"Name": "Janet", "Email": " jane@x.com ", "Status": "Active", "Score": 3})),
    ]);
    MemoryBase::new("appParity").with_table(contacts)
}

async fn csv_base(auto_save: bool) -> (TempDir, CsvBase) {
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("Contacts.csv"), CONTACTS_CSV)
        .await
        .unwrap();
    let config = CsvConfig::new(dir.path()).with_auto_save(auto_save);
    let base = CsvBase::load(config).await.unwrap();
    (dir, base)
}

/// (id, name, Status, Score, Archived) of every record, sorted by Score then Name.
async fn snapshot<T: Table>(table: &mut T) -> Vec<(String, String, String, String, String)> {
    let options = SelectOptions::new()
        .sort(SortSpec::desc("Score"))
        .sort(SortSpec::asc("Name"));
    table
        .select_records(options)
        .await
        .unwrap()
        .records()
        .iter()
        .map(|r| {
            (
                r.id().to_string(),
                r.name().to_string(),
                r.get_cell_value_as_string("Status"),
                r.get_cell_value_as_string("Score"),
                r.get_cell_value_as_string("Archived"),
            )
        })
        .collect()
}

async fn run_scripts<B: Base>(base: &mut B) -> (Vec<String>, Vec<String>, usize, String) {
    let contacts = base.get_table("Contacts").unwrap();

    let report = find_duplicates_by_field(contacts, "Email").await.unwrap();
    let groups: Vec<String> = report
        .groups
        .iter()
        .map(|g| format!("{}={}", g.key, g.record_ids.join("+")))
        .collect();
    assert_eq!(report.duplicate_count, 2);

    let archived = archive_records(contacts, &ArchiveOptions::new("Status", "Inactive"))
        .await
        .unwrap();

    let updated = bulk_update(contacts, "Status", "Active", &row(json!({"Tier": "gold"})))
        .await
        .unwrap();

    let stats = table_stats(contacts, "Tier").await.unwrap();
    let stats = format!("{}/{:?}/{}", stats.total, stats.by_value, stats.empty);

    (groups, archived, updated, stats)
}

#[tokio::test]
async fn test_scripts_agree_across_backends() {
    let mut memory = memory_base();
    let (_dir, mut csv) = csv_base(false).await;

    let from_memory = run_scripts(&mut memory).await;
    let from_csv = run_scripts(&mut csv).await;

    assert_eq!(from_memory, from_csv);
    assert_eq!(
        from_memory.0,
        vec![
            "john@x.com=rec00001+rec00002".to_string(),
            "jane@x.com=rec00003+rec00005".to_string(),
        ]
    );
    assert_eq!(from_memory.1, vec!["rec00002", "rec00004"]);
    assert_eq!(from_memory.2, 3);

    let memory_rows = snapshot(memory.get_table("Contacts").unwrap()).await;
    let csv_rows = snapshot(csv.get_table("Contacts").unwrap()).await;
    assert_eq!(memory_rows, csv_rows);
}

#[tokio::test]
async fn test_sort_order_is_lexical_everywhere() {
    let mut memory = memory_base();
    let (_dir, mut csv) = csv_base(false).await;

    let memory_rows = snapshot(memory.get_table("Contacts").unwrap()).await;
    let csv_rows = snapshot(csv.get_table("Contacts").unwrap()).await;

    // "9" > "7" > "3" > "10" > "" when compared as text
    let scores: Vec<&str> = memory_rows.iter().map(|r| r.3.as_str()).collect();
    assert_eq!(scores, vec!["9", "7", "3", "10", ""]);
    assert_eq!(memory_rows, csv_rows);
}

#[tokio::test]
async fn test_persisted_csv_matches_memory() {
    let mut memory = memory_base();
    let (dir, mut csv) = csv_base(true).await;
    run_scripts(&mut memory).await;
    run_scripts(&mut csv).await;

    let mut reloaded = CsvBase::load(CsvConfig::new(dir.path())).await.unwrap();
    let memory_rows = snapshot(memory.get_table("Contacts").unwrap()).await;
    let reloaded_rows = snapshot(reloaded.get_table("Contacts").unwrap()).await;
    assert_eq!(memory_rows, reloaded_rows);

    let contacts = reloaded.get_table("Contacts").unwrap();
    let result = contacts.select_records(SelectOptions::new()).await.unwrap();
    let jim = result.get_record("rec00004").unwrap();
    assert_eq!(jim.get_cell_value("Archived"), &json!(true));
    assert_eq!(jim.get_cell_value("Score"), &Value::Null);
}
