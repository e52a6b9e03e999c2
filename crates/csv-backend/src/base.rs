//! A directory of CSV files acting as a base.

use crate::config::CsvConfig;
use crate::table::CsvTable;
use table_core::{Base, HarnessError, Result, Table};
use tracing::info;

/// Base backed by a directory with one CSV file per table.
#[derive(Debug)]
pub struct CsvBase {
    id: String,
    config: CsvConfig,
    tables: Vec<CsvTable>,
}

impl CsvBase {
    /// Load every `*.csv` file in the configured directory, sorted by file name.
    pub async fn load(config: CsvConfig) -> Result<Self> {
        let dir = &config.data_dir;
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| HarnessError::storage(dir, e))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| HarnessError::storage(dir, e))?
        {
            let path = entry.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| HarnessError::storage(&path, e))?
                .is_file();
            if is_csv && is_file {
                paths.push(path);
            }
        }
        paths.sort();

        let mut tables = Vec::with_capacity(paths.len());
        for path in paths {
            tables.push(CsvTable::load(path, &config).await?);
        }

        let id = dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("csv")
            .to_string();
        info!(
            "Loaded {} tables from {} (auto-save {})",
            tables.len(),
            dir.display(),
            if config.auto_save { "on" } else { "off" }
        );

        Ok(Self { id, config, tables })
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Write every table back to disk, regardless of the auto-save setting.
    pub async fn save_all(&self) -> Result<()> {
        for table in &self.tables {
            table.save().await?;
        }
        Ok(())
    }
}

impl Base for CsvBase {
    type Table = CsvTable;

    fn id(&self) -> &str {
        &self.id
    }

    fn tables(&self) -> &[CsvTable] {
        &self.tables
    }

    fn get_table(&mut self, name_or_id: &str) -> Result<&mut CsvTable> {
        match self
            .tables
            .iter()
            .position(|t| t.name() == name_or_id || t.id() == name_or_id)
        {
            Some(pos) => Ok(&mut self.tables[pos]),
            None => Err(HarnessError::TableNotFound {
                name: name_or_id.to_string(),
                available: self.table_names(),
            }),
        }
    }
}
