//! CSV backend configuration.

use std::path::PathBuf;

/// Configuration for the CSV mirror.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Directory holding one `<table>.csv` file per table
    pub data_dir: PathBuf,

    /// Rewrite the backing file after every mutation (default: true)
    ///
    /// When `false`, mutations stay in memory until [`crate::CsvTable::save`]
    /// is called, leaving the files untouched.
    pub auto_save: bool,

    /// CSV delimiter character (default: ',')
    pub delimiter: u8,
}

impl CsvConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            auto_save: true,
            delimiter: b',',
        }
    }
}
