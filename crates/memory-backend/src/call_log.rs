//! Append-only log of calls made against a mock table.

use table_core::{FieldSet, RecordUpdate, SelectOptions};

/// One invocation of a table operation, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Select(SelectOptions),
    Update { id: String, fields: FieldSet },
    UpdateMany(Vec<RecordUpdate>),
    Create(FieldSet),
    CreateMany(Vec<FieldSet>),
    Delete(String),
    DeleteMany(Vec<String>),
}

/// Calls in the order they were made. Failed calls are recorded too.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Vec<RecordedCall>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, call: RecordedCall) {
        self.calls.push(call);
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn selects(&self) -> Vec<&SelectOptions> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Select(options) => Some(options),
                _ => None,
            })
            .collect()
    }

    /// Every updated (id, fields) pair, single and batched alike.
    pub fn updates(&self) -> Vec<(&str, &FieldSet)> {
        self.calls
            .iter()
            .flat_map(|call| match call {
                RecordedCall::Update { id, fields } => vec![(id.as_str(), fields)],
                RecordedCall::UpdateMany(batch) => batch
                    .iter()
                    .map(|u| (u.id.as_str(), &u.fields))
                    .collect(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// Every field set passed to a create, single and batched alike.
    pub fn creates(&self) -> Vec<&FieldSet> {
        self.calls
            .iter()
            .flat_map(|call| match call {
                RecordedCall::Create(fields) => vec![fields],
                RecordedCall::CreateMany(batch) => batch.iter().collect(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// Every id passed to a delete, single and batched alike.
    pub fn deletes(&self) -> Vec<&str> {
        self.calls
            .iter()
            .flat_map(|call| match call {
                RecordedCall::Delete(id) => vec![id.as_str()],
                RecordedCall::DeleteMany(ids) => ids.iter().map(String::as_str).collect(),
                _ => Vec::new(),
            })
            .collect()
    }
}
