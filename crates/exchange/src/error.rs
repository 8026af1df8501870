use std::path::PathBuf;

use thiserror::Error;

use crate::codec::ImportPolicy;

/// Failure of a whole import or export.
///
/// Problems with a single row or entry are not errors: they are logged,
/// skipped and counted in [`crate::ImportSummary`].
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// The document as a whole could not be understood.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("{format} import does not support the {policy} policy")]
    UnsupportedPolicy {
        format: &'static str,
        policy: ImportPolicy,
    },

    /// Writing failed, or the source could not be read mid-import.
    #[error("csv i/o failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json encode failed: {0}")]
    JsonWrite(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExchangeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }
}
