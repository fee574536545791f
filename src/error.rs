// src/error.rs
use thiserror::Error;

/// Error taxonomy for the ingestion pipeline.
///
/// Adapter-level failures (`Fetch`, `Parse`) stay inside the refresh cycle:
/// the orchestrator logs them and records an empty batch for that source.
/// Only `SourceNotFound` crosses the public `refresh_source` boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A refresh was requested for an id the registry does not know.
    #[error("unknown source: {0}")]
    SourceNotFound(String),

    /// Network failure: connect error, timeout, non-success status, or a
    /// headless render that produced no document.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The fetched payload could not be parsed.
    #[error("{what}: parse failed: {reason}")]
    Parse { what: String, reason: String },
}

impl IngestError {
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        Self::Fetch {
            url,
            reason: err.to_string(),
        }
    }
}
