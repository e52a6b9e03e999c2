//! Behaviour every local backend must show, checked through the shared traits.

use airtable_harness::scripts::find_duplicates_by_field;
use airtable_harness_csv_backend::{CsvBase, CsvConfig};
use airtable_harness_memory_backend::{MemoryBase, MemoryTable};
use serde_json::{json, Value};
use table_core::{
    Base, ErrorKind, FieldSet, Record, RecordUpdate, SelectOptions, SortSpec, Table,
};
use tempfile::TempDir;

const TASKS_CSV: &str = "\
id,Name,Status,Priority
rec1,Task 1,Pending,High
rec2,Task 2,Completed,Medium
rec3,Task 3,In Progress,Low
";

fn row(value: Value) -> FieldSet {
    value.as_object().cloned().unwrap()
}

async fn tasks_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("Tasks.csv"), TASKS_CSV)
        .await
        .unwrap();
    dir
}

fn memory_tasks() -> MemoryBase {
    MemoryBase::new("appScenario").with_table(
        MemoryTable::new("Tasks")
            .with_record("rec1", row(json!({"Name": "Task 1", "Status": "Pending", "Priority": "High"})))
            .with_record("rec2", row(json!({"Name": "Task 2", "Status": "Completed", "Priority": "Medium"})))
            .with_record("rec3", row(json!({"Name": "Task 3", "Status": "In Progress", "Priority": "Low"}))),
    )
}

async fn names_sorted_desc<T: Table>(table: &mut T) -> Vec<String> {
    table
        .select_records(SelectOptions::new().sort(SortSpec::desc("Name")))
        .await
        .unwrap()
        .records()
        .iter()
        .map(|r| r.name().to_string())
        .collect()
}

async fn created_ids_are_usable<T: Table>(table: &mut T) {
    let ids = table
        .create_records(vec![row(json!({"Name": "New A"})), row(json!({"Name": "New B"}))])
        .await
        .unwrap();
    let single = table.create_record(row(json!({"Name": "New C"}))).await.unwrap();

    table
        .update_record(&ids[0], row(json!({"Status": "Pending"})))
        .await
        .unwrap();
    table.delete_record(&ids[1]).await.unwrap();
    table.delete_record(&single).await.unwrap();

    let result = table.select_records(SelectOptions::new()).await.unwrap();
    assert_eq!(
        result.get_record(&ids[0]).unwrap().get_cell_value_as_string("Status"),
        "Pending"
    );
    assert!(result.get_record(&ids[1]).is_none());
}

async fn missing_ids_leave_data_alone<T: Table>(table: &mut T) {
    let before = table.select_records(SelectOptions::new()).await.unwrap().len();

    let err = table
        .update_record("recMissing", row(json!({"Status": "Done"})))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = table.delete_record("recMissing").await.unwrap_err();
    assert!(err.is_not_found());

    let after = table.select_records(SelectOptions::new()).await.unwrap().len();
    assert_eq!(before, after);
}

async fn absent_fields_read_as_null<T: Table>(table: &mut T) {
    let result = table.select_records(SelectOptions::new()).await.unwrap();
    for record in result.records() {
        assert_eq!(record.get_cell_value("No Such Field"), &Value::Null);
        assert_eq!(record.get_cell_value_as_string("No Such Field"), "");
    }
}

#[tokio::test]
async fn test_descending_name_sort() {
    let dir = tasks_dir().await;
    let mut csv = CsvBase::load(CsvConfig::new(dir.path())).await.unwrap();
    let mut memory = memory_tasks();

    let expected = vec!["Task 3", "Task 2", "Task 1"];
    assert_eq!(names_sorted_desc(csv.get_table("Tasks").unwrap()).await, expected);
    assert_eq!(names_sorted_desc(memory.get_table("Tasks").unwrap()).await, expected);
}

#[tokio::test]
async fn test_identifier_stability() {
    let dir = tasks_dir().await;
    let mut csv = CsvBase::load(CsvConfig::new(dir.path())).await.unwrap();
    let mut memory = memory_tasks();

    created_ids_are_usable(csv.get_table("Tasks").unwrap()).await;
    created_ids_are_usable(memory.get_table("Tasks").unwrap()).await;
}

#[tokio::test]
async fn test_not_found_symmetry() {
    let dir = tasks_dir().await;
    let mut csv = CsvBase::load(CsvConfig::new(dir.path())).await.unwrap();
    let mut memory = memory_tasks();

    missing_ids_leave_data_alone(csv.get_table("Tasks").unwrap()).await;
    missing_ids_leave_data_alone(memory.get_table("Tasks").unwrap()).await;
    assert!(csv.get_table("Projects").unwrap_err().is_not_found());
    assert!(memory.get_table("Projects").unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_null_safety() {
    let dir = tasks_dir().await;
    let mut csv = CsvBase::load(CsvConfig::new(dir.path())).await.unwrap();
    let mut memory = memory_tasks();

    absent_fields_read_as_null(csv.get_table("Tasks").unwrap()).await;
    absent_fields_read_as_null(memory.get_table("Tasks").unwrap()).await;
}

#[tokio::test]
async fn test_batch_aborts_at_first_missing_record() {
    let mut memory = MemoryBase::new("appBatch").with_table(
        MemoryTable::new("Items").with_records((1..=5).map(|n| row(json!({"Name": format!("Item {n}")})))),
    );
    let items = memory.get_table("Items").unwrap();
    let done = || row(json!({"Status": "Done"}));
    let updates = vec![
        RecordUpdate::new("rec00001", done()),
        RecordUpdate::new("rec00002", done()),
        RecordUpdate::new("rec00404", done()),
        RecordUpdate::new("rec00004", done()),
        RecordUpdate::new("rec00005", done()),
    ];

    let err = items.update_records(updates).await.unwrap_err();
    assert!(err.is_not_found());
    let statuses: Vec<String> = items
        .select_records(SelectOptions::new())
        .await
        .unwrap()
        .records()
        .iter()
        .map(|r| r.get_cell_value_as_string("Status"))
        .collect();
    assert_eq!(statuses, vec!["Done", "Done", "", "", ""]);
}

#[tokio::test]
async fn test_duplicate_emails() {
    let mut memory = MemoryBase::new("appDupes").with_table(MemoryTable::new("Contacts").with_records([
        row(json!({"Email": "john@x.com"})),
        row(json!({"Email": "JOHN@X.COM"})),
        row(json!({"Email": "jane@x.com"})),
    ]));

    let report = find_duplicates_by_field(memory.get_table("Contacts").unwrap(), "Email")
        .await
        .unwrap();
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].record_ids.len(), 2);
    assert_eq!(report.duplicate_count, 1);
}

#[tokio::test]
async fn test_disabled_auto_save_leaves_file_untouched() {
    let dir = tasks_dir().await;
    let path = dir.path().join("Tasks.csv");
    let before = tokio::fs::read(&path).await.unwrap();

    let config = CsvConfig::new(dir.path()).with_auto_save(false);
    let mut csv = CsvBase::load(config.clone()).await.unwrap();
    let tasks = csv.get_table("Tasks").unwrap();
    tasks
        .update_record("rec1", row(json!({"Status": "Completed", "Reviewed": true})))
        .await
        .unwrap();
    tasks.create_record(row(json!({"Name": "Task 4"}))).await.unwrap();
    tasks.delete_record("rec2").await.unwrap();

    assert_eq!(tokio::fs::read(&path).await.unwrap(), before);

    let mut reloaded = CsvBase::load(config).await.unwrap();
    let result = reloaded
        .get_table("Tasks")
        .unwrap()
        .select_records(SelectOptions::new())
        .await
        .unwrap();
    assert_eq!(result.record_ids(), vec!["rec1", "rec2", "rec3"]);
    assert_eq!(
        result.get_record("rec1").unwrap().get_cell_value_as_string("Status"),
        "Pending"
    );
}

#[tokio::test]
async fn test_mixed_types_survive_save_and_reload() {
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("Mixed.csv"), "id,Name\n").await.unwrap();

    let mut csv = CsvBase::load(CsvConfig::new(dir.path())).await.unwrap();
    let rows = vec![
        row(json!({"Name": "a", "Flag": true, "Count": 42, "Ratio": 0.5, "Tags": ["x", "y"], "Meta": {"k": 1}, "Note": null})),
        row(json!({"Name": "b", "Flag": false, "Count": -7, "Ratio": 1.25, "Tags": [], "Meta": {}, "Note": "plain text"})),
    ];
    let ids = csv
        .get_table("Mixed")
        .unwrap()
        .create_records(rows.clone())
        .await
        .unwrap();

    let mut reloaded = CsvBase::load(CsvConfig::new(dir.path())).await.unwrap();
    let result = reloaded
        .get_table("Mixed")
        .unwrap()
        .select_records(SelectOptions::new())
        .await
        .unwrap();

    for (id, expected) in ids.iter().zip(&rows) {
        let record = result.get_record(id).unwrap();
        for (field, value) in expected {
            assert_eq!(record.get_cell_value(field), value, "{id}.{field}");
        }
    }
}
