use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use studio_ai::{AiNativeConfig, RetryPolicy};
use studio_catalog::{ModelCategory, ModelListArgs, DEFAULT_LIST_LIMIT};

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_category(value: &str) -> Result<ModelCategory, String> {
    value.parse()
}

#[derive(Debug, Parser)]
#[command(
    name = "studio-models",
    about = "Browse the unified AINative Studio model catalog",
    version
)]
/// Aggregates the live listings with curated entries on every invocation.
pub struct Cli {
    #[arg(
        long,
        env = "STUDIO_API_BASE",
        default_value = "https://api.ainative.studio",
        help = "Base URL of the AINative API serving the model listings."
    )]
    pub api_base: String,

    #[arg(
        long,
        env = "STUDIO_API_KEY",
        hide_env_values = true,
        help = "Optional bearer token sent with listing requests."
    )]
    pub api_key: Option<String>,

    #[arg(
        long,
        env = "STUDIO_MODELS_PATH",
        default_value = "/v1/models",
        help = "Path (or absolute URL) of the generic model listing."
    )]
    pub models_path: String,

    #[arg(
        long,
        env = "STUDIO_EMBEDDINGS_PATH",
        default_value = "/v1/embeddings/models",
        help = "Path (or absolute URL) of the embeddings listing."
    )]
    pub embeddings_path: String,

    #[arg(
        long,
        env = "STUDIO_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Per-request timeout for listing calls."
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long,
        env = "STUDIO_MAX_RETRIES",
        default_value_t = 2,
        help = "Retries per listing call on retryable failures."
    )]
    pub max_retries: usize,

    #[arg(
        long,
        env = "STUDIO_RETRY_BUDGET_MS",
        default_value_t = 0,
        help = "Total time a listing call may spend retrying. 0 disables the budget."
    )]
    pub retry_budget_ms: u64,

    #[arg(long, help = "Use deterministic backoff without jitter.")]
    pub no_retry_jitter: bool,

    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
/// Catalog operations; each one runs a fresh aggregation first.
pub enum CatalogCommand {
    /// List catalog entries, optionally filtered.
    List(ListCommandArgs),
    /// Show one catalog entry by slug.
    Show {
        slug: String,
        #[arg(long, help = "Print the entry as JSON.")]
        json: bool,
    },
    /// Write the aggregated catalog to a JSON snapshot.
    Export {
        #[arg(long, help = "Destination file for the snapshot.")]
        out: PathBuf,
    },
    /// Aggregate the catalog and check slug, id and category invariants.
    Validate,
}

#[derive(Debug, Args)]
pub struct ListCommandArgs {
    #[arg(
        long,
        default_value = "all",
        value_parser = parse_category,
        help = "One of: all, image, video, audio, coding, embedding."
    )]
    pub category: ModelCategory,

    #[arg(long, help = "Only show entries from this provider (case-insensitive).")]
    pub provider: Option<String>,

    #[arg(long, help = "Substring matched against name, id, provider and capabilities.")]
    pub query: Option<String>,

    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT, help = "Maximum rows to print. 0 prints all.")]
    pub limit: usize,

    #[arg(long, help = "Print matching entries as a JSON array.")]
    pub json: bool,
}

impl ListCommandArgs {
    pub fn to_list_args(&self) -> ModelListArgs {
        ModelListArgs {
            query: self.query.clone(),
            category: self.category,
            provider: self.provider.clone(),
            limit: self.limit,
        }
    }
}

impl Cli {
    pub fn upstream_config(&self) -> AiNativeConfig {
        AiNativeConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            models_path: self.models_path.clone(),
            embeddings_path: self.embeddings_path.clone(),
            request_timeout_ms: self.request_timeout_ms,
            retry: RetryPolicy {
                max_retries: self.max_retries,
                retry_budget_ms: self.retry_budget_ms,
                jitter: !self.no_retry_jitter,
            },
        }
    }
}
