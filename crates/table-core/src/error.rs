//! Error taxonomy shared by every backend.
//!
//! Scripts branch on [`HarnessError::kind`] to decide whether a failure is
//! recoverable (a single missing record) or fatal (the remote service
//! rejected the request).

use std::path::PathBuf;

/// Result alias used across the harness crates.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Coarse classification of a [`HarnessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Remote,
    Configuration,
    Storage,
}

/// Error type for all Base/Table/Record operations.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Record id does not exist in a local table
    #[error("Record '{id}' not found in table '{table}'")]
    RecordNotFound { table: String, id: String },

    /// Table name or id is not known to the base
    #[error("Table '{name}' not found. Available tables: {}", .available.join(", "))]
    TableNotFound { name: String, available: Vec<String> },

    /// No declared field matches the requested name or id
    #[error("Field '{field}' not found in table '{table}'")]
    FieldNotFound { table: String, field: String },

    /// Malformed input to a write operation
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Failure reported by (or while talking to) the remote API
    #[error("{}", remote_message(.status, .message))]
    Remote { status: Option<u16>, message: String },

    /// Missing or malformed settings detected at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a backing file failed
    #[error("Storage error for {}: {message}", .path.display())]
    Storage { path: PathBuf, message: String },
}

impl HarnessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::RecordNotFound { .. }
            | HarnessError::TableNotFound { .. }
            | HarnessError::FieldNotFound { .. } => ErrorKind::NotFound,
            HarnessError::Validation(_) => ErrorKind::Validation,
            HarnessError::Remote { .. } => ErrorKind::Remote,
            HarnessError::Config(_) => ErrorKind::Configuration,
            HarnessError::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn storage(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        HarnessError::Storage {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

fn remote_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("Remote API error ({status}): {message}"),
        None => format!("Remote API request failed: {message}"),
    }
}
