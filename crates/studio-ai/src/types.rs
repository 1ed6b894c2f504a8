use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// One entry of the generic model listing.
///
/// Only `id` is required; every other field defaults so that upstream schema
/// drift degrades to missing metadata instead of a failed listing.
pub struct UpstreamModel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "owned_by")]
    pub provider: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// One entry of the embeddings listing.
pub struct UpstreamEmbeddingModel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "owned_by")]
    pub provider: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub dimensions: Option<u32>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

// JSON backends send `null` for unset lists.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error)]
/// Failures of an upstream listing call.
pub enum StudioAiError {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
/// Read-only access to the two upstream model listings.
///
/// The catalog aggregator is written against this trait so tests and
/// alternative transports can stand in for the HTTP client.
pub trait ModelListingSource: Send + Sync {
    async fn list_models(&self) -> Result<Vec<UpstreamModel>, StudioAiError>;

    async fn list_embedding_models(&self) -> Result<Vec<UpstreamEmbeddingModel>, StudioAiError>;
}
