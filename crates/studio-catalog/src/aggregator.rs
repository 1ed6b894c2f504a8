use std::{collections::HashSet, sync::Arc};

use studio_ai::ModelListingSource;

use crate::{
    best_effort, curated_models, normalize_embedding_model, normalize_listed_model, CuratedModel,
    ModelDraft, SlugRegistry, SourceReport, UnifiedAiModel, UpstreamSource,
};

#[derive(Debug, Clone, PartialEq)]
/// Entries from one aggregation plus how each upstream read went.
pub struct AggregatedCatalog {
    pub entries: Vec<UnifiedAiModel>,
    pub reports: Vec<SourceReport>,
}

#[derive(Clone)]
/// Builds the unified catalog from the upstream listings and curated entries.
///
/// Stateless: every call re-reads both listings and recomputes categories and
/// slugs from scratch.
pub struct CatalogAggregator {
    source: Arc<dyn ModelListingSource>,
    curated: &'static [CuratedModel],
}

impl CatalogAggregator {
    pub fn new(source: Arc<dyn ModelListingSource>) -> Self {
        Self {
            source,
            curated: curated_models(),
        }
    }

    pub fn with_curated(mut self, curated: &'static [CuratedModel]) -> Self {
        self.curated = curated;
        self
    }

    pub async fn aggregate(&self) -> AggregatedCatalog {
        let ((listed, models_report), (embeddings, embeddings_report)) = tokio::join!(
            best_effort(UpstreamSource::Models, self.source.list_models()),
            best_effort(
                UpstreamSource::Embeddings,
                self.source.list_embedding_models()
            ),
        );

        let entries = assemble_catalog(
            listed.into_iter().map(normalize_listed_model).collect(),
            embeddings
                .into_iter()
                .map(normalize_embedding_model)
                .collect(),
            self.curated.iter().map(CuratedModel::to_draft).collect(),
        );
        tracing::debug!(
            entries = entries.len(),
            models = models_report.summary().as_str(),
            embeddings = embeddings_report.summary().as_str(),
            "catalog aggregated"
        );

        AggregatedCatalog {
            entries,
            reports: vec![models_report, embeddings_report],
        }
    }

    /// Full catalog for one call. Upstream failures shrink the result; they
    /// never fail it.
    pub async fn aggregate_all_models(&self) -> Vec<UnifiedAiModel> {
        self.aggregate().await.entries
    }
}

/// Merges normalized drafts into catalog entries.
///
/// Curated drafts claim ids and slugs first, then listed models, then
/// embeddings, so curated slugs never depend on upstream state. A draft whose
/// id is already claimed is dropped. Output order is listed, embeddings,
/// curated.
pub fn assemble_catalog(
    listed: Vec<ModelDraft>,
    embeddings: Vec<ModelDraft>,
    curated: Vec<ModelDraft>,
) -> Vec<UnifiedAiModel> {
    let mut ids = HashSet::new();
    let mut slugs = SlugRegistry::new();
    let mut claim = |drafts: Vec<ModelDraft>, origin: &'static str| {
        drafts
            .into_iter()
            .filter(|draft| {
                let fresh = ids.insert(draft.id.clone());
                if !fresh {
                    tracing::debug!(id = draft.id.as_str(), origin, "dropping duplicate catalog id");
                }
                fresh
            })
            .map(|draft| draft.finalize(&mut slugs))
            .collect::<Vec<_>>()
    };

    let curated = claim(curated, "curated");
    let listed = claim(listed, "models");
    let embeddings = claim(embeddings, "embeddings");

    let mut entries = listed;
    entries.extend(embeddings);
    entries.extend(curated);
    entries
}
