use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    listing::parse_listing_payload,
    retry::{is_retryable_http_error, new_request_id, parse_retry_after_ms, should_retry_status},
    ModelListingSource, RetryPolicy, StudioAiError, UpstreamEmbeddingModel, UpstreamModel,
};

#[derive(Debug, Clone)]
/// Where and how the listing client reaches the AINative API.
pub struct AiNativeConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub models_path: String,
    pub embeddings_path: String,
    pub request_timeout_ms: u64,
    pub retry: RetryPolicy,
}

impl AiNativeConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: None,
            models_path: "/v1/models".to_string(),
            embeddings_path: "/v1/embeddings/models".to_string(),
            request_timeout_ms: 10_000,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP implementation of [`ModelListingSource`] for the AINative API.
pub struct AiNativeClient {
    client: reqwest::Client,
    config: AiNativeConfig,
}

impl AiNativeClient {
    pub fn new(config: AiNativeConfig) -> Result<Self, StudioAiError> {
        let api_base = config.api_base.trim();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(StudioAiError::InvalidConfig(format!(
                "api base '{}' must start with http:// or https://",
                config.api_base
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            let bearer = format!("Bearer {api_key}");
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&bearer).map_err(|e| {
                    StudioAiError::InvalidConfig(format!("invalid API key header: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AiNativeConfig {
        &self.config
    }

    fn listing_url(&self, path: &str) -> String {
        let base = self.config.api_base.trim().trim_end_matches('/');
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{base}/{}", path.trim_start_matches('/'))
    }

    async fn fetch_listing<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, StudioAiError> {
        let url = self.listing_url(path);
        let policy = self.config.retry;
        let started = Instant::now();
        let mut attempt = 0usize;

        loop {
            let request_id = new_request_id();
            let response = self
                .client
                .get(&url)
                .header("x-studio-request-id", request_id.as_str())
                .header("x-studio-retry-attempt", attempt.to_string())
                .send()
                .await;

            let delay_ms = match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let raw = response.text().await?;
                        return parse_listing_payload(&raw);
                    }

                    let retry_after_ms = parse_retry_after_ms(response.headers());
                    let body = response.text().await.unwrap_or_default();
                    if !should_retry_status(status.as_u16()) {
                        return Err(StudioAiError::HttpStatus {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    let delay_ms = policy.delay_ms(attempt, retry_after_ms);
                    if !policy.allows(attempt, elapsed_ms(started), delay_ms) {
                        tracing::debug!(
                            url = url.as_str(),
                            request_id = request_id.as_str(),
                            status = status.as_u16(),
                            attempt,
                            delay_ms,
                            "giving up on upstream listing"
                        );
                        return Err(StudioAiError::HttpStatus {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    tracing::debug!(
                        url = url.as_str(),
                        request_id = request_id.as_str(),
                        status = status.as_u16(),
                        attempt,
                        delay_ms,
                        "retrying upstream listing"
                    );
                    delay_ms
                }
                Err(error) => {
                    if !is_retryable_http_error(&error) {
                        return Err(StudioAiError::Http(error));
                    }
                    let delay_ms = policy.delay_ms(attempt, None);
                    if !policy.allows(attempt, elapsed_ms(started), delay_ms) {
                        return Err(StudioAiError::Http(error));
                    }
                    tracing::debug!(
                        url = url.as_str(),
                        request_id = request_id.as_str(),
                        attempt,
                        delay_ms,
                        %error,
                        "retrying upstream listing after transport error"
                    );
                    delay_ms
                }
            };

            sleep(Duration::from_millis(delay_ms)).await;
            attempt += 1;
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl ModelListingSource for AiNativeClient {
    async fn list_models(&self) -> Result<Vec<UpstreamModel>, StudioAiError> {
        self.fetch_listing(&self.config.models_path).await
    }

    async fn list_embedding_models(&self) -> Result<Vec<UpstreamEmbeddingModel>, StudioAiError> {
        self.fetch_listing(&self.config.embeddings_path).await
    }
}
