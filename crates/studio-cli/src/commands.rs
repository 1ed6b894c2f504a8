use std::sync::Arc;

use anyhow::{bail, Context, Result};
use studio_ai::AiNativeClient;
use studio_catalog::{
    render_model_show, render_models_list, select_models, validate_catalog,
    write_catalog_snapshot, CatalogAggregator, ModelCatalog,
};

use crate::cli_args::{CatalogCommand, Cli};

pub(crate) async fn run_cli(cli: Cli) -> Result<()> {
    let catalog = load_catalog(&cli).await?;
    let output = execute_command(&cli.command, &catalog)?;
    println!("{output}");
    Ok(())
}

async fn load_catalog(cli: &Cli) -> Result<ModelCatalog> {
    let client = AiNativeClient::new(cli.upstream_config())
        .context("failed to configure AINative listing client")?;
    let aggregator = CatalogAggregator::new(Arc::new(client));
    let catalog = ModelCatalog::from_aggregated(aggregator.aggregate().await);
    if catalog.is_degraded() {
        tracing::warn!(
            diagnostics = %catalog.diagnostics_line(),
            "serving partial model catalog"
        );
    }
    Ok(catalog)
}

fn execute_command(command: &CatalogCommand, catalog: &ModelCatalog) -> Result<String> {
    match command {
        CatalogCommand::List(list) => {
            let args = list.to_list_args();
            if list.json {
                let (_, rows) = select_models(catalog, &args);
                return serde_json::to_string_pretty(&rows)
                    .context("failed to render model list as json");
            }
            Ok(render_models_list(catalog, &args))
        }
        CatalogCommand::Show { slug, json } => {
            let Some(entry) = catalog.find_by_slug(slug) else {
                bail!("{}", render_model_show(catalog, slug));
            };
            if *json {
                return serde_json::to_string_pretty(entry)
                    .context("failed to render model entry as json");
            }
            Ok(render_model_show(catalog, &entry.slug))
        }
        CatalogCommand::Export { out } => {
            let snapshot = write_catalog_snapshot(out, catalog)?;
            Ok(format!(
                "export: path={} entries={} {}",
                out.display(),
                snapshot.entries.len(),
                catalog.diagnostics_line()
            ))
        }
        CatalogCommand::Validate => {
            validate_catalog(catalog.entries()).context("catalog validation failed")?;
            Ok(format!("validate: ok {}", catalog.diagnostics_line()))
        }
    }
}
