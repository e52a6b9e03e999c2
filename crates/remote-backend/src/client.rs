//! HTTP client for the Airtable REST API.

use crate::config::RemoteConfig;
use crate::record::RemoteRecord;
use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use table_core::{FieldSet, HarnessError, RecordUpdate, Result};
use tracing::debug;

/// Most records a single write request may carry.
pub const MAX_BATCH_SIZE: usize = 10;

/// Records requested per list page.
pub const PAGE_SIZE: usize = 100;

/// Permission needed by the metadata (table discovery) endpoint.
pub const SCHEMA_READ_SCOPE: &str = "schema.bases:read";

/// A table as reported by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    #[serde(default)]
    fields: FieldSet,
    #[serde(rename = "createdTime")]
    created_time: Option<String>,
}

impl ApiRecord {
    fn into_record(self) -> RemoteRecord {
        RemoteRecord::new(self.id, self.fields, self.created_time)
    }
}

#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    records: Vec<ApiRecord>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WriteRecordsResponse {
    #[serde(default)]
    records: Vec<ApiRecord>,
}

#[derive(Debug, Deserialize)]
struct ListTablesResponse {
    tables: Vec<TableSummary>,
}

#[derive(Serialize)]
struct NewRecord<'a> {
    fields: &'a FieldSet,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    records: Vec<NewRecord<'a>>,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    records: &'a [RecordUpdate],
}

/// Authenticated client bound to one base.
#[derive(Debug)]
pub struct RemoteClient {
    http: reqwest::Client,
    api_root: Url,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        config.validate()?;
        let api_root = Url::parse(&config.api_url).map_err(|e| {
            HarnessError::Config(format!("Invalid AIRTABLE_API_URL '{}': {e}", config.api_url))
        })?;
        if api_root.cannot_be_a_base() {
            return Err(HarnessError::Config(format!(
                "Invalid AIRTABLE_API_URL '{}': not a base URL",
                config.api_url
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_root,
            config,
        })
    }

    pub fn base_id(&self) -> &str {
        &self.config.base_id
    }

    /// Fetch every record of a table, following `offset` across pages.
    pub async fn list_records(
        &self,
        table: &str,
        fields: Option<&[String]>,
    ) -> Result<Vec<RemoteRecord>> {
        let url = self.url(&[self.base_id(), table]);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut pages = 0;

        loop {
            let mut query: Vec<(&str, String)> = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(fields) = fields {
                query.extend(fields.iter().map(|f| ("fields[]", f.clone())));
            }
            if let Some(offset) = &offset {
                query.push(("offset", offset.clone()));
            }

            let response = self.send(self.http.get(url.clone()).query(&query)).await?;
            let page: ListRecordsResponse = response.json().await.map_err(remote_error)?;
            pages += 1;
            records.extend(page.records.into_iter().map(ApiRecord::into_record));

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!("Fetched {} records of '{table}' in {pages} page(s)", records.len());
        Ok(records)
    }

    /// Create one batch of records; ids come back in request order.
    pub async fn create_records(&self, table: &str, batch: &[FieldSet]) -> Result<Vec<RemoteRecord>> {
        check_batch_size(batch.len())?;
        let body = CreateBody {
            records: batch.iter().map(|fields| NewRecord { fields }).collect(),
        };
        let url = self.url(&[self.base_id(), table]);
        let response = self.send(self.http.post(url).json(&body)).await?;
        let created: WriteRecordsResponse = response.json().await.map_err(remote_error)?;
        Ok(created.records.into_iter().map(ApiRecord::into_record).collect())
    }

    /// Update one batch of records, merging the given fields.
    pub async fn update_records(&self, table: &str, batch: &[RecordUpdate]) -> Result<()> {
        check_batch_size(batch.len())?;
        let url = self.url(&[self.base_id(), table]);
        self.send(self.http.patch(url).json(&UpdateBody { records: batch }))
            .await?;
        Ok(())
    }

    /// Delete one batch of records.
    pub async fn delete_records(&self, table: &str, ids: &[String]) -> Result<()> {
        check_batch_size(ids.len())?;
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("records[]", id.as_str())).collect();
        let url = self.url(&[self.base_id(), table]);
        self.send(self.http.delete(url).query(&query)).await?;
        Ok(())
    }

    /// List the tables of the base through the metadata endpoint.
    pub async fn list_tables(&self) -> Result<Vec<TableSummary>> {
        let url = self.url(&["meta", "bases", self.base_id(), "tables"]);
        let response = match self.send(self.http.get(url)).await {
            Ok(response) => response,
            Err(HarnessError::Remote {
                status: Some(status @ (401 | 403 | 404)),
                message,
            }) => {
                return Err(HarnessError::Remote {
                    status: Some(status),
                    message: format!(
                        "{message}. Listing tables requires a token with the '{SCHEMA_READ_SCOPE}' scope"
                    ),
                })
            }
            Err(e) => return Err(e),
        };
        let listed: ListTablesResponse = response.json().await.map_err(remote_error)?;
        Ok(listed.tables)
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // api_root was checked to be a base URL in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v0").extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(remote_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(HarnessError::Remote {
            status: Some(status.as_u16()),
            message: error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            }),
        })
    }
}

fn check_batch_size(len: usize) -> Result<()> {
    if len > MAX_BATCH_SIZE {
        return Err(HarnessError::Validation(format!(
            "at most {MAX_BATCH_SIZE} records per request, got {len}"
        )));
    }
    Ok(())
}

fn remote_error(err: reqwest::Error) -> HarnessError {
    HarnessError::Remote {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

/// Pull a readable message out of an API error body.
///
/// The service answers either `{"error": {"type": ..., "message": ...}}` or
/// `{"error": "TYPE"}`.
fn error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            let trimmed = body.trim();
            return (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
    };
    let error = parsed.get("error")?;
    if let Some(kind) = error.as_str() {
        return Some(kind.to_string());
    }
    let kind = error.get("type").and_then(|t| t.as_str());
    let message = error.get("message").and_then(|m| m.as_str());
    match (kind, message) {
        (Some(kind), Some(message)) => Some(format!("{kind}: {message}")),
        (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
        (None, None) => None,
    }
}
