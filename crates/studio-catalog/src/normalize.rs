use std::collections::HashSet;

use studio_ai::{UpstreamEmbeddingModel, UpstreamModel};

use crate::{InvocationMethod, ModelDraft, SourceType};

pub const DEFAULT_PROVIDER: &str = "AINative";
pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";
pub const EMBEDDINGS_ENDPOINT: &str = "/v1/embeddings";

const CHAT_CAPABILITIES: [&str; 2] = ["text-generation", "chat"];
const EMBEDDING_CAPABILITIES: [&str; 2] = ["embedding", "semantic-search"];

/// Normalizes one item of the generic model listing.
///
/// Items that ship without capabilities are tagged from their id: ids that
/// mention `embed` become embedding models, everything else a chat model.
pub fn normalize_listed_model(model: UpstreamModel) -> ModelDraft {
    let id = model.id.trim().to_string();
    let name = non_blank(model.name).unwrap_or_else(|| id.clone());
    let provider = non_blank(model.provider).unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let mut capabilities = clean_capabilities(model.capabilities);
    let inferred_embedding =
        capabilities.is_empty() && id.to_ascii_lowercase().contains("embed");
    if capabilities.is_empty() {
        let defaults = if inferred_embedding {
            EMBEDDING_CAPABILITIES
        } else {
            CHAT_CAPABILITIES
        };
        capabilities = defaults.iter().map(|tag| tag.to_string()).collect();
    }

    let (default_endpoint, source_type) = if inferred_embedding {
        (EMBEDDINGS_ENDPOINT, SourceType::Embedding)
    } else {
        (CHAT_COMPLETIONS_ENDPOINT, SourceType::Text)
    };
    let description = non_blank(model.description)
        .unwrap_or_else(|| format!("{name} model served by {provider}"));

    ModelDraft {
        endpoint: non_blank(model.endpoint).unwrap_or_else(|| default_endpoint.to_string()),
        method: model
            .method
            .as_deref()
            .and_then(InvocationMethod::parse)
            .unwrap_or_default(),
        id,
        name,
        provider,
        capabilities,
        description,
        source_type,
    }
}

/// Normalizes one item of the embeddings listing.
pub fn normalize_embedding_model(model: UpstreamEmbeddingModel) -> ModelDraft {
    let id = model.id.trim().to_string();
    let name = non_blank(model.name).unwrap_or_else(|| id.clone());
    let provider = non_blank(model.provider).unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let mut capabilities = clean_capabilities(model.capabilities);
    if capabilities.is_empty() {
        capabilities = EMBEDDING_CAPABILITIES
            .iter()
            .map(|tag| tag.to_string())
            .collect();
    }

    let description = non_blank(model.description).unwrap_or_else(|| match model.dimensions {
        Some(dimensions) => format!("{dimensions}-dimension embedding model served by {provider}"),
        None => format!("{name} embedding model served by {provider}"),
    });

    ModelDraft {
        endpoint: non_blank(model.endpoint).unwrap_or_else(|| EMBEDDINGS_ENDPOINT.to_string()),
        method: InvocationMethod::Post,
        id,
        name,
        provider,
        capabilities,
        description,
        source_type: SourceType::Embedding,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// Trims tags and drops blanks plus case-insensitive repeats, keeping the
// first spelling seen.
fn clean_capabilities(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty() && seen.insert(tag.to_ascii_lowercase()))
        .collect()
}
