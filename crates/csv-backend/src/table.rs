//! A single CSV-backed table.

use crate::config::CsvConfig;
use async_trait::async_trait;
use csv_types::{field_value_to_csv, infer_field_value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use table_core::{
    check_field_names, find_field, AsRecordId, FieldDescriptor, FieldSet, HarnessError,
    LocalRecord, QueryResult, Record, RecordStore, Result, SelectOptions, Table,
};
use tracing::{debug, info, warn};

/// Header written for the id column when the file did not have one.
const DEFAULT_ID_COLUMN: &str = "id";

/// Records of the CSV backend.
pub type CsvRecord = LocalRecord;

/// A table loaded from one CSV file.
#[derive(Debug)]
pub struct CsvTable {
    name: String,
    path: PathBuf,
    id_column: String,
    columns: Vec<String>,
    fields: Vec<FieldDescriptor>,
    store: RecordStore,
    auto_save: bool,
    delimiter: u8,
}

impl CsvTable {
    /// Load a table from a CSV file; the table is named after the file stem.
    pub async fn load(path: impl Into<PathBuf>, config: &CsvConfig) -> Result<Self> {
        let path = path.into();
        let name = table_name_from_path(&path)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| HarnessError::storage(&path, e))?;
        let table = Self::parse(name, path, &bytes, config)?;
        info!(
            "Loaded {} records into table '{}' from {}",
            table.store.len(),
            table.name,
            table.path.display()
        );
        Ok(table)
    }

    fn parse(name: String, path: PathBuf, bytes: &[u8], config: &CsvConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(config.delimiter)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| HarnessError::storage(&path, format!("Failed to read CSV headers: {e}")))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let id_index = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("id"));
        let id_column = id_index
            .map(|i| headers[i].clone())
            .unwrap_or_else(|| DEFAULT_ID_COLUMN.to_string());
        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != id_index)
            .map(|(_, h)| h.clone())
            .collect();

        debug!("CSV headers/columns for '{name}': {headers:?}");

        let mut rows = Vec::new();
        let mut seen = HashSet::new();
        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                HarnessError::storage(&path, format!("Failed to read CSV record {}: {e}", row + 1))
            })?;

            if record.len() != headers.len() {
                return Err(HarnessError::storage(
                    &path,
                    format!(
                        "Column count mismatch in CSV row {}: expected {} columns ({}), but found {} columns",
                        row + 1,
                        headers.len(),
                        headers.join(", "),
                        record.len()
                    ),
                ));
            }

            let mut id = None;
            let mut fields = FieldSet::new();
            for (i, text) in record.iter().enumerate() {
                if Some(i) == id_index {
                    id = Some(text.to_string());
                } else {
                    fields.insert(headers[i].clone(), infer_field_value(text));
                }
            }

            let duplicate = id
                .as_deref()
                .filter(|id| !id.is_empty() && !seen.insert(id.to_string()));
            if let Some(existing) = duplicate {
                warn!("Duplicate id '{existing}' in {}; assigning a new id", path.display());
            }
            rows.push((id, fields));
        }

        let mut store = RecordStore::new(name.clone());
        store.insert_rows(rows);

        let fields = columns.iter().map(FieldDescriptor::text).collect();
        Ok(Self {
            name,
            path,
            id_column,
            columns,
            fields,
            store,
            auto_save: config.auto_save,
            delimiter: config.delimiter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Rewrite the backing file: header, then one row per record.
    pub async fn save(&self) -> Result<()> {
        let bytes = self.render()?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| HarnessError::storage(&self.path, e))?;
        debug!(
            "Saved {} records of '{}' to {}",
            self.store.len(),
            self.name,
            self.path.display()
        );
        Ok(())
    }

    fn render(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        let header = std::iter::once(self.id_column.as_str())
            .chain(self.columns.iter().map(String::as_str));
        writer
            .write_record(header)
            .map_err(|e| HarnessError::storage(&self.path, e))?;

        for record in self.store.records() {
            let row = std::iter::once(record.id().to_string()).chain(
                self.columns
                    .iter()
                    .map(|column| field_value_to_csv(record.get_cell_value(column))),
            );
            writer
                .write_record(row)
                .map_err(|e| HarnessError::storage(&self.path, e))?;
        }

        writer
            .into_inner()
            .map_err(|e| HarnessError::storage(&self.path, e))
    }

    async fn persist(&self) -> Result<()> {
        if self.auto_save {
            self.save().await
        } else {
            Ok(())
        }
    }

    /// Field names in `fields` that are not yet columns of the file.
    fn undeclared(&self, fields: &FieldSet) -> Vec<String> {
        fields
            .keys()
            .filter(|key| !self.columns.contains(*key))
            .filter(|key| {
                let clashes = key.trim().eq_ignore_ascii_case(&self.id_column);
                if clashes {
                    warn!("Field '{key}' clashes with the id column of '{}' and is not saved", self.name);
                }
                !clashes
            })
            .cloned()
            .collect()
    }

    fn declare(&mut self, columns: Vec<String>) {
        for column in columns {
            debug!("Adding column '{column}' to table '{}'", self.name);
            self.fields.push(FieldDescriptor::text(column.clone()));
            self.columns.push(column);
        }
    }
}

#[async_trait]
impl Table for CsvTable {
    type Record = CsvRecord;

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

    async fn select_records(&mut self, options: SelectOptions) -> Result<QueryResult<CsvRecord>> {
        Ok(self.store.select(&options))
    }

    async fn update_record<I>(&mut self, record: &I, fields: FieldSet) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync,
    {
        check_field_names(&fields)?;
        let new_columns = self.undeclared(&fields);
        self.store.update(record.record_id(), fields)?;
        self.declare(new_columns);
        self.persist().await
    }

    async fn create_record(&mut self, fields: FieldSet) -> Result<String> {
        check_field_names(&fields)?;
        let new_columns = self.undeclared(&fields);
        let id = self.store.insert(None, fields);
        self.declare(new_columns);
        self.persist().await?;
        Ok(id)
    }

    async fn delete_record<I>(&mut self, record: &I) -> Result<()>
    where
        I: AsRecordId + ?Sized + Sync,
    {
        self.store.delete(record.record_id())?;
        self.persist().await
    }
}

fn table_name_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| HarnessError::storage(path, "file name is not valid UTF-8"))
}
