//! Remote backend configuration.

use table_core::{HarnessError, Result};

/// Public Airtable API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// Credentials and endpoint of the remote base.
#[derive(Clone)]
pub struct RemoteConfig {
    /// Personal access token
    pub api_key: String,

    /// Base identifier (`app...`)
    pub base_id: String,

    /// API root, overridable for tests and proxies
    pub api_url: String,
}

impl RemoteConfig {
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Check required settings before any client is built.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(HarnessError::Config(
                "AIRTABLE_API_KEY is required for the remote backend".to_string(),
            ));
        }
        if self.base_id.trim().is_empty() {
            return Err(HarnessError::Config(
                "AIRTABLE_BASE_ID is required for the remote backend".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}
