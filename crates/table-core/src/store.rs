//! Ordered, id-indexed record storage for the CSV and in-memory backends.

use crate::error::{HarnessError, Result};
use crate::query::{apply_select_options, QueryResult, SelectOptions};
use crate::record::{LocalRecord, Record as _};
use crate::values::FieldSet;
use std::collections::HashMap;

/// Prefix of synthesized record ids.
pub const RECORD_ID_PREFIX: &str = "rec";

/// Records of one table in insertion order, with O(1) id lookup.
#[derive(Debug, Clone)]
pub struct RecordStore {
    table: String,
    records: Vec<LocalRecord>,
    positions: HashMap<String, usize>,
    next_seq: u64,
}

impl RecordStore {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            records: Vec::new(),
            positions: HashMap::new(),
            next_seq: 1,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn records(&self) -> &[LocalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Add a record, synthesizing an id when none (or an empty one) is given.
    ///
    /// A supplied id that is already taken is replaced by a fresh one.
    pub fn insert(&mut self, id: Option<String>, fields: FieldSet) -> String {
        let id = match id {
            Some(id) if !id.is_empty() && !self.contains(&id) => id,
            _ => self.next_id(),
        };
        self.positions.insert(id.clone(), self.records.len());
        self.records.push(LocalRecord::new(id.clone(), fields));
        id
    }

    /// Add records in order, resolving every explicit id before any id is
    /// synthesized.
    ///
    /// A row without an id never takes an id that a later row names. Among
    /// rows naming the same id, the first one keeps it.
    pub fn insert_rows<I>(&mut self, rows: I) -> Vec<String>
    where
        I: IntoIterator<Item = (Option<String>, FieldSet)>,
    {
        let rows: Vec<(Option<String>, FieldSet)> = rows.into_iter().collect();
        let start = self.records.len();

        let mut claimed = vec![false; rows.len()];
        for (offset, (id, _)) in rows.iter().enumerate() {
            if let Some(id) = id.as_deref().filter(|id| !id.is_empty() && !self.contains(id)) {
                self.positions.insert(id.to_string(), start + offset);
                claimed[offset] = true;
            }
        }

        let mut ids = Vec::with_capacity(rows.len());
        for ((id, fields), claimed) in rows.into_iter().zip(claimed) {
            let id = match id {
                Some(id) if claimed => id,
                _ => {
                    let id = self.next_id();
                    self.positions.insert(id.clone(), self.records.len());
                    id
                }
            };
            self.records.push(LocalRecord::new(id.clone(), fields));
            ids.push(id);
        }
        ids
    }

    pub fn update(&mut self, id: &str, fields: FieldSet) -> Result<()> {
        let pos = self.position(id)?;
        self.records[pos].apply_fields(fields);
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let pos = self.position(id)?;
        self.records.remove(pos);
        self.positions.remove(id);
        for (i, record) in self.records.iter().enumerate().skip(pos) {
            self.positions.insert(record.id().to_string(), i);
        }
        Ok(())
    }

    /// Snapshot of the matching records, ordered per the options.
    pub fn select(&self, options: &SelectOptions) -> QueryResult<LocalRecord> {
        apply_select_options(self.records.clone(), options)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| HarnessError::RecordNotFound {
                table: self.table.clone(),
                id: id.to_string(),
            })
    }

    fn next_id(&mut self) -> String {
        loop {
            let candidate = format!("{RECORD_ID_PREFIX}{:05}", self.next_seq);
            self.next_seq += 1;
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}
