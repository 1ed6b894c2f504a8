use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{derive_category, ModelCategory, SlugRegistry};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
/// Origin bucket of a catalog entry.
pub enum SourceType {
    Text,
    Embedding,
    Audio,
    Video,
    Image,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Embedding => "embedding",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
/// HTTP verb a model endpoint is invoked with.
pub enum InvocationMethod {
    Get,
    #[default]
    Post,
}

impl InvocationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// Parses an upstream verb, treating anything unrecognized as `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            _ => None,
        }
    }
}

impl fmt::Display for InvocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// A catalog entry with its display category and unique URL slug.
pub struct UnifiedAiModel {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub provider: String,
    pub category: Option<ModelCategory>,
    pub capabilities: Vec<String>,
    pub description: String,
    pub endpoint: String,
    pub method: InvocationMethod,
    pub source_type: SourceType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A normalized entry that has not yet been given a category or slug.
pub struct ModelDraft {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub capabilities: Vec<String>,
    pub description: String,
    pub endpoint: String,
    pub method: InvocationMethod,
    pub source_type: SourceType,
}

impl ModelDraft {
    /// Assigns the category from the keyword table and claims a slug.
    pub fn finalize(self, slugs: &mut SlugRegistry) -> UnifiedAiModel {
        let category = derive_category(&self.capabilities);
        let slug = slugs.claim(&self.name, &self.id, &self.provider);
        UnifiedAiModel {
            id: self.id,
            slug,
            name: self.name,
            provider: self.provider,
            category,
            capabilities: self.capabilities,
            description: self.description,
            endpoint: self.endpoint,
            method: self.method,
            source_type: self.source_type,
        }
    }
}
