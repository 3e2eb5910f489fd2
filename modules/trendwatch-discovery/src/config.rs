use std::time::Duration;

/// Retry policy for rate-limited trend source calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Fixed wait between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(60),
        }
    }
}

/// Tunables for one orchestrator instance.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Snapshot freshness window.
    pub ttl: chrono::Duration,
    /// Lookback window sent to the trend source.
    pub timeframe: String,
    /// Max terms per upstream request (the source's hard limit is 5).
    pub chunk_size: usize,
    /// Pause between consecutive chunk calls.
    pub chunk_pause: Duration,
    /// Pause between the scoring and expansion stages.
    pub stage_pause: Duration,
    /// Max related entries taken per source term and listing.
    pub max_related_per_term: usize,
    pub retry: RetryPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ttl: chrono::Duration::days(7),
            timeframe: "today 1-m".to_string(),
            chunk_size: 5,
            chunk_pause: Duration::from_secs(3),
            stage_pause: Duration::from_secs(3),
            max_related_per_term: 10,
            retry: RetryPolicy::default(),
        }
    }
}
