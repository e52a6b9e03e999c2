//! Read-through record returned by the remote backend.

use table_core::{display_name, AsRecordId, FieldSet, FieldValue, Record};

/// A freshly fetched row. Holds no mutable state; every select rebuilds it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRecord {
    id: String,
    name: String,
    fields: FieldSet,
    created_time: Option<String>,
}

impl RemoteRecord {
    pub fn new(id: impl Into<String>, fields: FieldSet, created_time: Option<String>) -> Self {
        let id = id.into();
        let name = display_name(&id, &fields);
        Self {
            id,
            name,
            fields,
            created_time,
        }
    }

    /// Creation timestamp reported by the service.
    pub fn created_time(&self) -> Option<&str> {
        self.created_time.as_deref()
    }
}

static NULL: FieldValue = FieldValue::Null;

impl Record for RemoteRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_cell_value(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&NULL)
    }
}

impl AsRecordId for RemoteRecord {
    fn record_id(&self) -> &str {
        &self.id
    }
}
