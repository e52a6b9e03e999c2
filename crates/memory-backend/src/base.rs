//! Mock base holding pre-declared in-memory tables.

use crate::table::MemoryTable;
use table_core::{Base, HarnessError, Result, Table};

/// A base whose tables are declared up front; unknown names are errors.
#[derive(Debug, Clone, Default)]
pub struct MemoryBase {
    id: String,
    tables: Vec<MemoryTable>,
}

impl MemoryBase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tables: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: MemoryTable) -> Self {
        self.add_table(table);
        self
    }

    /// Declare a table, replacing any existing table of the same name.
    pub fn add_table(&mut self, table: MemoryTable) {
        match self.tables.iter().position(|t| t.name() == table.name()) {
            Some(pos) => self.tables[pos] = table,
            None => self.tables.push(table),
        }
    }

    /// Forget recorded calls on every table.
    pub fn reset_calls(&mut self) {
        for table in &mut self.tables {
            table.reset_calls();
        }
    }
}

impl Base for MemoryBase {
    type Table = MemoryTable;

    fn id(&self) -> &str {
        &self.id
    }

    fn tables(&self) -> &[MemoryTable] {
        &self.tables
    }

    fn get_table(&mut self, name_or_id: &str) -> Result<&mut MemoryTable> {
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
