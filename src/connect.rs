//! Backend construction and dispatch.

use crate::config::{BackendConfig, BackendKind, HarnessConfig};
use airtable_harness_csv_backend::CsvBase;
use airtable_harness_memory_backend::{MemoryBase, MemoryTable};
use airtable_harness_remote_backend::RemoteBase;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use table_core::{Base, FieldDescriptor, FieldSet};
use tracing::info;

/// A connected backend. The variant is fixed at construction time.
#[derive(Debug)]
pub enum Backend {
    Remote(RemoteBase),
    Csv(CsvBase),
    Memory(MemoryBase),
}

impl Backend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Remote(_) => BackendKind::Remote,
            Backend::Csv(_) => BackendKind::Csv,
            Backend::Memory(_) => BackendKind::Mock,
        }
    }

    /// Make every table of the base known.
    ///
    /// Only the remote backend needs a round trip for this; local backends
    /// know their tables from the start.
    pub async fn discover_tables(&mut self) -> anyhow::Result<()> {
        if let Backend::Remote(base) = self {
            base.load_all_tables()
                .await
                .context("Failed to discover remote tables")?;
        }
        Ok(())
    }
}

/// Work that runs against any [`Base`] implementation.
#[async_trait]
pub trait BaseTask: Send {
    type Output: Send;

    async fn run<B: Base>(self, base: &mut B) -> anyhow::Result<Self::Output>;
}

/// Build the configured backend.
pub async fn connect(config: &HarnessConfig) -> anyhow::Result<Backend> {
    let backend = match &config.backend {
        BackendConfig::Remote(remote) => {
            info!("Using remote base {}", remote.base_id);
            Backend::Remote(RemoteBase::new(remote.clone())?)
        }
        BackendConfig::Csv(csv) => {
            let base = CsvBase::load(csv.clone()).await.with_context(|| {
                format!("Failed to load CSV tables from {}", csv.data_dir.display())
            })?;
            Backend::Csv(base)
        }
        BackendConfig::Mock => {
            info!("Using in-memory sample base");
            Backend::Memory(sample_base())
        }
    };
    Ok(backend)
}

/// Run a task against whichever backend is connected.
pub async fn run_with_backend<T: BaseTask>(
    backend: &mut Backend,
    task: T,
) -> anyhow::Result<T::Output> {
    match backend {
        Backend::Remote(base) => task.run(base).await,
        Backend::Csv(base) => task.run(base).await,
        Backend::Memory(base) => task.run(base).await,
    }
}

/// The base used by the mock backend: a small task list and a contact list.
pub fn sample_base() -> MemoryBase {
    let tasks = MemoryTable::new("Tasks")
        .with_fields(vec![
            FieldDescriptor::text("Name"),
            FieldDescriptor::new("fldStatus", "Status", "singleSelect"),
            FieldDescriptor::new("fldPriority", "Priority", "singleSelect"),
        ])
        .with_records([
            row(json!({"Name": "Task 1", "Status": "Pending", "Priority": "High"})),
            row(json!({"Name": "Task 2", "Status": "Completed", "Priority": "Medium"})),
            row(json!({"Name": "Task 3", "Status": "In Progress", "Priority": "Low"})),
        ]);

    let contacts = MemoryTable::new("Contacts")
        .with_fields(vec![
            FieldDescriptor::text("Name"),
            FieldDescriptor::new("fldEmail", "Email", "email"),
        ])
        .with_records([
            row(json!({"Name": "John", "Email": "john@x.com"})),
            row(json!({"Name": "J. Smith", "Email": "JOHN@X.COM"})),
            row(json!({"Name": "Jane", "Email": "jane@x.com"})),
        ]);

    MemoryBase::new("appMock").with_table(tasks).with_table(contacts)
}

fn row(value: serde_json::Value) -> FieldSet {
    match value {
        serde_json::Value::Object(fields) => fields,
        _ => FieldSet::new(),
    }
}
