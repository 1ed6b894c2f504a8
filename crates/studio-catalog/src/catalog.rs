//! Browse and detail views over one aggregation result.
//!
//! The browse side filters and renders the catalog; the detail side resolves
//! a single entry by slug. Both read the same [`ModelCatalog`], so a slug shown
//! while browsing resolves on a freshly aggregated catalog as long as upstream
//! state is unchanged.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::{
    derive_category, is_valid_slug, AggregatedCatalog, ModelCategory, SourceReport,
    UnifiedAiModel,
};

pub const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Debug, Clone)]
/// One aggregation result indexed by slug for browse and detail lookups.
pub struct ModelCatalog {
    entries: Vec<UnifiedAiModel>,
    slug_index: HashMap<String, usize>,
    reports: Vec<SourceReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browse filters for `render_models_list`.
pub struct ModelListArgs {
    pub query: Option<String>,
    pub category: ModelCategory,
    pub provider: Option<String>,
    pub limit: usize,
}

impl Default for ModelListArgs {
    fn default() -> Self {
        Self {
            query: None,
            category: ModelCategory::All,
            provider: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ModelCatalog {
    pub fn from_aggregated(aggregated: AggregatedCatalog) -> Self {
        let mut slug_index = HashMap::with_capacity(aggregated.entries.len());
        for (index, entry) in aggregated.entries.iter().enumerate() {
            slug_index.entry(entry.slug.clone()).or_insert(index);
        }
        Self {
            entries: aggregated.entries,
            slug_index,
            reports: aggregated.reports,
        }
    }

    pub fn entries(&self) -> &[UnifiedAiModel] {
        &self.entries
    }

    pub fn reports(&self) -> &[SourceReport] {
        &self.reports
    }

    pub fn is_degraded(&self) -> bool {
        self.reports.iter().any(SourceReport::is_degraded)
    }

    /// Detail lookup. Exact slugs hit the index; otherwise the trimmed,
    /// lowercased input is tried so pasted URLs still resolve.
    pub fn find_by_slug(&self, slug: &str) -> Option<&UnifiedAiModel> {
        if let Some(index) = self.slug_index.get(slug) {
            return self.entries.get(*index);
        }
        let normalized = slug.trim().to_ascii_lowercase();
        self.slug_index
            .get(&normalized)
            .and_then(|index| self.entries.get(*index))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&UnifiedAiModel> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn filter_by_category(&self, category: ModelCategory) -> Vec<&UnifiedAiModel> {
        self.entries
            .iter()
            .filter(|entry| category.matches(entry.category))
            .collect()
    }

    pub fn diagnostics_line(&self) -> String {
        let mut line = format!("entries={}", self.entries.len());
        for report in &self.reports {
            line.push(' ');
            line.push_str(&report.summary());
        }
        line
    }
}

/// Checks the catalog-wide invariants: well-formed unique slugs, unique ids,
/// non-empty names and providers, and categories that agree with the keyword
/// table.
pub fn validate_catalog(entries: &[UnifiedAiModel]) -> Result<()> {
    let mut slugs = HashSet::new();
    let mut ids = HashSet::new();
    for entry in entries {
        if entry.id.trim().is_empty() {
            bail!("catalog contains entry with empty id (slug '{}')", entry.slug);
        }
        if !is_valid_slug(&entry.slug) {
            bail!("catalog entry '{}' has malformed slug '{}'", entry.id, entry.slug);
        }
        if entry.name.trim().is_empty() {
            bail!("catalog entry '{}' has empty name", entry.id);
        }
        if entry.provider.trim().is_empty() {
            bail!("catalog entry '{}' has empty provider", entry.id);
        }
        if entry.category == Some(ModelCategory::All) {
            bail!(
                "catalog entry '{}' is categorized as All, which is a filter only",
                entry.id
            );
        }
        let expected = derive_category(&entry.capabilities);
        if entry.category != expected {
            bail!(
                "catalog entry '{}' has category {} but its capabilities imply {}",
                entry.id,
                format_category(entry.category),
                format_category(expected)
            );
        }
        if !ids.insert(entry.id.as_str()) {
            bail!("catalog contains duplicate id '{}'", entry.id);
        }
        if !slugs.insert(entry.slug.as_str()) {
            bail!("catalog contains duplicate slug '{}'", entry.slug);
        }
    }
    Ok(())
}

/// Entries matching the browse filters, sorted by category, name and slug.
/// Returns the total match count alongside the rows cut to `args.limit`
/// (`0` means no limit).
pub fn select_models<'a>(
    catalog: &'a ModelCatalog,
    args: &ModelListArgs,
) -> (usize, Vec<&'a UnifiedAiModel>) {
    let mut rows = catalog
        .entries()
        .iter()
        .filter(|entry| model_entry_matches_filters(entry, args))
        .collect::<Vec<_>>();

    rows.sort_by(|left, right| {
        format_category(left.category)
            .cmp(&format_category(right.category))
            .then_with(|| {
                left.name
                    .to_ascii_lowercase()
                    .cmp(&right.name.to_ascii_lowercase())
            })
            .then_with(|| left.slug.cmp(&right.slug))
    });

    let total_matches = rows.len();
    if args.limit > 0 && rows.len() > args.limit {
        rows.truncate(args.limit);
    }
    (total_matches, rows)
}

pub fn render_models_list(catalog: &ModelCatalog, args: &ModelListArgs) -> String {
    let (total_matches, rows) = select_models(catalog, args);

    let mut lines = vec![format!(
        "models list: category={} total_matches={} shown={} {}",
        args.category,
        total_matches,
        rows.len(),
        catalog.diagnostics_line()
    )];
    if rows.is_empty() {
        lines.push("models list: no matches".to_string());
        return lines.join("\n");
    }

    for entry in rows {
        lines.push(format!(
            "model: {} name={:?} provider={:?} category={} source_type={} capabilities={}",
            entry.slug,
            entry.name,
            entry.provider,
            format_category(entry.category),
            entry.source_type,
            entry.capabilities.join(",")
        ));
    }

    lines.join("\n")
}

pub fn render_model_show(catalog: &ModelCatalog, slug: &str) -> String {
    let Some(entry) = catalog.find_by_slug(slug) else {
        return format!(
            "model show: not found: {}\nrun `studio-models list` to inspect available catalog entries",
            slug.trim()
        );
    };

    [
        format!("model show: {}", entry.slug),
        format!("id={}", entry.id),
        format!("name={}", entry.name),
        format!("provider={}", entry.provider),
        format!("category={}", format_category(entry.category)),
        format!("source_type={}", entry.source_type),
        format!("capabilities={}", entry.capabilities.join(",")),
        format!("endpoint={} {}", entry.method, entry.endpoint),
        format!("description={}", entry.description),
    ]
    .join("\n")
}

fn model_entry_matches_filters(entry: &UnifiedAiModel, args: &ModelListArgs) -> bool {
    if !args.category.matches(entry.category) {
        return false;
    }

    if let Some(provider) = args.provider.as_deref() {
        if !entry.provider.eq_ignore_ascii_case(provider.trim()) {
            return false;
        }
    }

    if let Some(query) = args.query.as_deref() {
        let normalized_query = query.trim().to_ascii_lowercase();
        let haystack = format!(
            "{} {} {} {}",
            entry.name,
            entry.id,
            entry.provider,
            entry.capabilities.join(" ")
        )
        .to_ascii_lowercase();
        if !haystack.contains(&normalized_query) {
            return false;
        }
    }

    true
}

fn format_category(category: Option<ModelCategory>) -> &'static str {
    category.map_or("uncategorized", ModelCategory::as_str)
}
