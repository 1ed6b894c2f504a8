//! Best-effort policy for upstream listing reads.
//!
//! A failed listing never fails an aggregation: the source contributes no
//! entries and its [`SourceReport`] records why.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Upstream listings feeding the catalog.
pub enum UpstreamSource {
    Models,
    Embeddings,
}

impl UpstreamSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Embeddings => "embeddings",
        }
    }
}

impl fmt::Display for UpstreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
/// Whether an upstream read contributed entries or was replaced by an empty list.
pub enum SourceStatus {
    Loaded { entries: usize },
    Degraded { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Outcome of one upstream read within an aggregation.
pub struct SourceReport {
    pub source: UpstreamSource,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, SourceStatus::Degraded { .. })
    }

    /// Compact `key=value` form used in diagnostics lines.
    pub fn summary(&self) -> String {
        match &self.status {
            SourceStatus::Loaded { entries } => format!("{}=loaded:{entries}", self.source),
            SourceStatus::Degraded { reason } => format!(
                "{}=degraded:{}",
                self.source,
                reason.split_whitespace().collect::<Vec<_>>().join(" ")
            ),
        }
    }
}

/// Awaits one upstream read, substituting an empty list on failure.
pub async fn best_effort<T, E, F>(source: UpstreamSource, request: F) -> (Vec<T>, SourceReport)
where
    F: Future<Output = Result<Vec<T>, E>>,
    E: fmt::Display,
{
    match request.await {
        Ok(items) => {
            let report = SourceReport {
                source,
                status: SourceStatus::Loaded {
                    entries: items.len(),
                },
            };
            tracing::debug!(source = source.as_str(), entries = items.len(), "upstream listing loaded");
            (items, report)
        }
        Err(error) => {
            let reason = error.to_string();
            tracing::warn!(
                source = source.as_str(),
                reason = reason.as_str(),
                "upstream listing unavailable; continuing without it"
            );
            (
                Vec::new(),
                SourceReport {
                    source,
                    status: SourceStatus::Degraded { reason },
                },
            )
        }
    }
}
