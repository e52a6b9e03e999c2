//! Remote base: lazily bound tables plus optional discovery.

use crate::client::RemoteClient;
use crate::config::RemoteConfig;
use crate::table::RemoteTable;
use std::sync::Arc;
use table_core::{Base, Result, Table};
use tracing::{debug, info};

/// Whether the table list has been fetched from the metadata endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryState {
    /// Only tables requested through `get_table` are known
    Unloaded,
    /// Every table of the base has been discovered
    Loaded,
}

/// Base bound to a remote Airtable base.
///
/// `get_table` never fails: unknown names get a new binding on first use,
/// and a bad name only surfaces when an operation reaches the service.
#[derive(Debug)]
pub struct RemoteBase {
    client: Arc<RemoteClient>,
    tables: Vec<RemoteTable>,
    state: DiscoveryState,
}

impl RemoteBase {
    /// Validate the configuration and build the client. No request is made.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Arc::new(RemoteClient::new(config)?);
        Ok(Self {
            client,
            tables: Vec::new(),
            state: DiscoveryState::Unloaded,
        })
    }

    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    /// Discover every table of the base and add it to the table list.
    pub async fn load_all_tables(&mut self) -> Result<()> {
        let summaries = self.client.list_tables().await?;
        for summary in summaries {
            match self
                .tables
                .iter_mut()
                .find(|t| t.name() == summary.name || t.id() == summary.id)
            {
                Some(table) => table.set_id(summary.id),
                None => self.tables.push(RemoteTable::new(
                    summary.id,
                    summary.name,
                    Arc::clone(&self.client),
                )),
            }
        }
        self.state = DiscoveryState::Loaded;
        info!(
            "Discovered {} tables in base {}",
            self.tables.len(),
            self.client.base_id()
        );
        Ok(())
    }

    /// Discover tables and return every known table name.
    pub async fn fetch_table_names(&mut self) -> Result<Vec<String>> {
        self.load_all_tables().await?;
        Ok(self.table_names())
    }
}

impl Base for RemoteBase {
    type Table = RemoteTable;

    fn id(&self) -> &str {
        self.client.base_id()
    }

    fn tables(&self) -> &[RemoteTable] {
        &self.tables
    }

    fn get_table(&mut self, name_or_id: &str) -> Result<&mut RemoteTable> {
        let pos = match self
            .tables
            .iter()
            .position(|t| t.name() == name_or_id || t.id() == name_or_id)
        {
            Some(pos) => pos,
            None => {
                debug!("Creating binding for table '{name_or_id}'");
                self.tables.push(RemoteTable::new(
                    name_or_id,
                    name_or_id,
                    Arc::clone(&self.client),
                ));
                self.tables.len() - 1
            }
        };
        Ok(&mut self.tables[pos])
    }
}
