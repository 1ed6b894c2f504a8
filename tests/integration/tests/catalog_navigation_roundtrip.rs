use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use httpmock::prelude::*;
use serde_json::json;
use studio_ai::{
    AiNativeClient, AiNativeConfig, ModelListingSource, RetryPolicy, StudioAiError,
    UpstreamEmbeddingModel, UpstreamModel,
};
use studio_catalog::{
    render_models_list, validate_catalog, CatalogAggregator, ModelCatalog, ModelCategory,
    ModelListArgs,
};

struct ScriptedListings {
    models: Result<Vec<UpstreamModel>, String>,
    embeddings: Result<Vec<UpstreamEmbeddingModel>, String>,
    calls: AtomicUsize,
}

impl ScriptedListings {
    fn new(
        models: Result<Vec<UpstreamModel>, String>,
        embeddings: Result<Vec<UpstreamEmbeddingModel>, String>,
    ) -> Self {
        Self {
            models,
            embeddings,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelListingSource for ScriptedListings {
    async fn list_models(&self) -> Result<Vec<UpstreamModel>, StudioAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models
            .clone()
            .map_err(StudioAiError::InvalidResponse)
    }

    async fn list_embedding_models(&self) -> Result<Vec<UpstreamEmbeddingModel>, StudioAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.embeddings
            .clone()
            .map_err(StudioAiError::InvalidResponse)
    }
}

fn upstream(id: &str, name: &str, capabilities: &[&str]) -> UpstreamModel {
    UpstreamModel {
        id: id.to_string(),
        name: Some(name.to_string()),
        capabilities: capabilities.iter().map(|tag| tag.to_string()).collect(),
        ..UpstreamModel::default()
    }
}

fn mixed_listings() -> ScriptedListings {
    ScriptedListings::new(
        Ok(vec![
            upstream("gpt-4o", "GPT-4o", &["text-generation", "vision"]),
            upstream("deepseek-coder", "DeepSeek Coder", &["code"]),
            upstream("veo-3", "Veo 3", &["text-to-video"]),
            upstream("whisper-large", "Whisper", &["transcription"]),
        ]),
        Ok(vec![UpstreamEmbeddingModel {
            id: "bge-small".to_string(),
            dimensions: Some(384),
            ..UpstreamEmbeddingModel::default()
        }]),
    )
}

#[tokio::test]
async fn integration_empty_upstream_still_exposes_audio_trio() {
    let source = Arc::new(ScriptedListings::new(Ok(vec![]), Ok(vec![])));
    let aggregator = CatalogAggregator::new(source.clone());

    let catalog = ModelCatalog::from_aggregated(aggregator.aggregate().await);
    let mut audio_ids = catalog
        .filter_by_category(ModelCategory::Audio)
        .into_iter()
        .map(|entry| entry.id.as_str())
        .collect::<Vec<_>>();
    audio_ids.sort_unstable();

    assert_eq!(
        audio_ids,
        vec![
            "audio-tts",
            "audio-whisper-transcription",
            "audio-whisper-translation"
        ]
    );
    assert!(!catalog.is_degraded());
    assert_eq!(source.call_count(), 2);
}

#[tokio::test]
async fn integration_failing_upstreams_degrade_to_curated_entries() {
    let source = Arc::new(ScriptedListings::new(
        Err("models offline".to_string()),
        Err("embeddings offline".to_string()),
    ));
    let catalog =
        ModelCatalog::from_aggregated(CatalogAggregator::new(source).aggregate().await);

    assert!(catalog.is_degraded());
    assert!(!catalog.entries().is_empty());
    assert!(catalog
        .entries()
        .iter()
        .all(|entry| entry.category.is_some()));
    assert!(catalog.diagnostics_line().contains("models=degraded:"));
    assert!(catalog.diagnostics_line().contains("embeddings=degraded:"));
    validate_catalog(catalog.entries()).expect("curated catalog should validate");
}

#[tokio::test]
async fn integration_category_filters_are_mutually_exclusive() {
    let catalog = ModelCatalog::from_aggregated(
        CatalogAggregator::new(Arc::new(mixed_listings()))
            .aggregate()
            .await,
    );

    let mut seen = std::collections::HashSet::new();
    for category in ModelCategory::ASSIGNABLE {
        for entry in catalog.filter_by_category(category) {
            assert!(
                seen.insert(entry.id.clone()),
                "entry '{}' matched more than one category",
                entry.id
            );
        }
    }
    let categorized = catalog
        .entries()
        .iter()
        .filter(|entry| entry.category.is_some())
        .count();
    assert_eq!(seen.len(), categorized);
    assert_eq!(
        catalog.filter_by_category(ModelCategory::All).len(),
        catalog.entries().len()
    );
    assert_eq!(
        catalog.find_by_id("gpt-4o").and_then(|entry| entry.category),
        Some(ModelCategory::Image)
    );
    assert_eq!(
        catalog.find_by_id("veo-3").and_then(|entry| entry.category),
        Some(ModelCategory::Video)
    );
}

#[tokio::test]
async fn integration_slugs_from_browse_resolve_on_fresh_aggregation() {
    let source = Arc::new(mixed_listings());
    let aggregator = CatalogAggregator::new(source.clone());

    let browse = ModelCatalog::from_aggregated(aggregator.aggregate().await);
    let rendered = render_models_list(
        &browse,
        &ModelListArgs {
            limit: 0,
            ..ModelListArgs::default()
        },
    );
    let detail = ModelCatalog::from_aggregated(aggregator.aggregate().await);

    for entry in browse.entries() {
        assert!(rendered.contains(&format!("model: {} ", entry.slug)));
        let resolved = detail
            .find_by_slug(&entry.slug)
            .unwrap_or_else(|| panic!("slug '{}' should resolve", entry.slug));
        assert_eq!(resolved, entry);
    }
    assert_eq!(browse.entries(), detail.entries());
    assert_eq!(source.call_count(), 4);

    let curated_whisper = detail.find_by_slug("whisper").expect("curated whisper");
    assert_eq!(curated_whisper.id, "audio-whisper-transcription");
    let upstream_whisper = detail.find_by_id("whisper-large").expect("upstream whisper");
    assert_ne!(upstream_whisper.slug, "whisper");
}

#[tokio::test]
async fn integration_http_client_feeds_aggregator_end_to_end() {
    let server = MockServer::start();
    let models = server.mock(|when, then| {
        when.method(GET).path("/v1/models");
        then.status(200).json_body(json!({
            "object": "list",
            "data": [
                { "id": "flux-dev", "owned_by": "Black Forest Labs",
                  "capabilities": ["image-generation"] },
                "llama-3.1-8b"
            ]
        }));
    });
    let embeddings = server.mock(|when, then| {
        when.method(GET).path("/v1/embeddings/models");
        then.status(502).body("bad gateway");
    });

    let client = AiNativeClient::new(AiNativeConfig {
        retry: RetryPolicy {
            max_retries: 1,
            retry_budget_ms: 0,
            jitter: false,
        },
        request_timeout_ms: 2_000,
        ..AiNativeConfig::new(server.base_url())
    })
    .expect("client");
    let catalog = ModelCatalog::from_aggregated(
        CatalogAggregator::new(Arc::new(client)).aggregate().await,
    );

    models.assert_calls(1);
    embeddings.assert_calls(2);
    assert!(catalog.is_degraded());
    let flux = catalog.find_by_id("flux-dev").expect("flux entry");
    assert_eq!(flux.category, Some(ModelCategory::Image));
    assert_eq!(flux.provider, "Black Forest Labs");
    assert!(catalog.find_by_id("llama-3.1-8b").is_some());
    validate_catalog(catalog.entries()).expect("aggregated catalog should validate");
}
