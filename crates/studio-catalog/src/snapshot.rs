use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use studio_core::{current_unix_timestamp, write_text_atomic};

use crate::{ModelCatalog, SourceReport, UnifiedAiModel};

pub const CATALOG_SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Exported view of one aggregation. Written for downstream tooling, never
/// read back by the aggregator.
pub struct CatalogSnapshot {
    pub schema_version: u32,
    pub generated_at_unix: u64,
    pub sources: Vec<SourceReport>,
    pub entries: Vec<UnifiedAiModel>,
}

impl CatalogSnapshot {
    pub fn from_catalog(catalog: &ModelCatalog) -> Self {
        Self {
            schema_version: CATALOG_SNAPSHOT_SCHEMA_VERSION,
            generated_at_unix: current_unix_timestamp(),
            sources: catalog.reports().to_vec(),
            entries: catalog.entries().to_vec(),
        }
    }
}

pub fn write_catalog_snapshot(path: &Path, catalog: &ModelCatalog) -> Result<CatalogSnapshot> {
    let snapshot = CatalogSnapshot::from_catalog(catalog);
    let payload =
        serde_json::to_string_pretty(&snapshot).context("failed to serialize catalog snapshot")?;
    write_text_atomic(path, &payload)
        .with_context(|| format!("failed to write catalog snapshot {}", path.display()))?;
    Ok(snapshot)
}
