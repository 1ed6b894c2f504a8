use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn since_unix_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// Seconds since the unix epoch; clocks set before 1970 read as zero.
pub fn current_unix_timestamp() -> u64 {
    since_unix_epoch().as_secs()
}

/// Milliseconds since the unix epoch, saturating at `u64::MAX`.
pub fn current_unix_timestamp_ms() -> u64 {
    u64::try_from(since_unix_epoch().as_millis()).unwrap_or(u64::MAX)
}
