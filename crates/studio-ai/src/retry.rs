use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

pub const BASE_BACKOFF_MS: u64 = 200;
/// Longest single wait a listing call will sleep before retrying. A longer
/// `Retry-After` ends the call instead.
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;
const MAX_BACKOFF_SHIFT: usize = 6;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);
static JITTER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Statuses worth another attempt: timeouts, conflicts, rate limits and 5xx.
pub fn should_retry_status(status: u16) -> bool {
    matches!(status, 408 | 409 | 425 | 429) || status >= 500
}

/// Reads `Retry-After` as delta-seconds or an HTTP date, in milliseconds.
pub fn parse_retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    let raw = headers.get(reqwest::header::RETRY_AFTER)?.to_str().ok()?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(seconds) = raw.parse::<u64>() {
        return Some(seconds.saturating_mul(1_000));
    }

    let retry_at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    let delay_ms = retry_at.signed_duration_since(Utc::now()).num_milliseconds();
    Some(u64::try_from(delay_ms).unwrap_or(0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Capped exponential backoff with optional jitter and a total time budget.
pub struct RetryPolicy {
    pub max_retries: usize,
    /// Total milliseconds the retries may spend; `0` disables the budget.
    pub retry_budget_ms: u64,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_budget_ms: 0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn backoff_ms(attempt: usize) -> u64 {
        BASE_BACKOFF_MS.saturating_mul(1_u64 << attempt.min(MAX_BACKOFF_SHIFT))
    }

    /// Delay before retrying `attempt`. A server-provided `Retry-After` acts
    /// as a floor, never as a cap.
    pub fn delay_ms(&self, attempt: usize, retry_after_ms: Option<u64>) -> u64 {
        let backoff = if self.jitter {
            jittered(Self::backoff_ms(attempt))
        } else {
            Self::backoff_ms(attempt)
        };
        retry_after_ms.map_or(backoff, |floor| backoff.max(floor))
    }

    /// True when another attempt is allowed after `attempt` failed, the wait
    /// stays under [`MAX_RETRY_DELAY_MS`], and sleeping `delay_ms` keeps the
    /// call inside the retry budget.
    pub fn allows(&self, attempt: usize, elapsed_ms: u64, delay_ms: u64) -> bool {
        if attempt >= self.max_retries || delay_ms > MAX_RETRY_DELAY_MS {
            return false;
        }
        self.retry_budget_ms == 0 || elapsed_ms.saturating_add(delay_ms) <= self.retry_budget_ms
    }
}

// Uniform-ish value in [base / 2, base].
fn jittered(base: u64) -> u64 {
    if base <= 1 {
        return base;
    }
    let low = base / 2;
    let width = base - low;
    let mut mixed = JITTER_COUNTER
        .fetch_add(1, Ordering::Relaxed)
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^= mixed >> 31;
    low + mixed % (width + 1)
}

pub(crate) fn is_retryable_http_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request() || error.is_body()
}

pub(crate) fn new_request_id() -> String {
    let count = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("studio-rs-{}-{count}", Utc::now().timestamp_millis())
}
