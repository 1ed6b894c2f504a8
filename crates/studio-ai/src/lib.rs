//! Upstream model-listing client for the Studio catalog.
//!
//! Exposes the wire types returned by the AINative listing endpoints, the
//! `ModelListingSource` seam the aggregator is written against, and a
//! reqwest-backed implementation with retry/backoff.
mod client;
mod listing;
mod retry;
mod types;

pub use client::{AiNativeClient, AiNativeConfig};
pub use listing::parse_listing_payload;
pub use retry::{
    parse_retry_after_ms, should_retry_status, RetryPolicy, BASE_BACKOFF_MS, MAX_RETRY_DELAY_MS,
};
pub use types::{ModelListingSource, StudioAiError, UpstreamEmbeddingModel, UpstreamModel};
