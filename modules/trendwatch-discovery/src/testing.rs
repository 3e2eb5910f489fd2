// Test mocks for the discovery core, one per trait boundary:
//
// - MockTrendSource (TrendSource) — HashMap-based term→series / term→related,
//   with call counters and failure/rate-limit injection
// - MemorySnapshotStore (SnapshotStore) — in-memory append-only rows
// - RecordingSleeper (Sleeper) — no real waiting, records requested durations
// - FixedClock (Clock) — deterministic now()

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gtrends_client::{RelatedEntry, RelatedQueries, TrendsError};
use trendwatch_common::DiscoverySnapshot;

use crate::traits::{Clock, Sleeper, SnapshotStore, TrendSource};

// ---------------------------------------------------------------------------
// MockTrendSource
// ---------------------------------------------------------------------------

/// HashMap-based trend source. Terms without a registered series are simply
/// absent from the response, matching the real source's behavior for
/// no-data terms. Builder pattern: `.on_series()`, `.on_related()`,
/// `.fail_series_for()`, `.rate_limit_next_series()`.
#[derive(Default)]
pub struct MockTrendSource {
    series: HashMap<String, Vec<f64>>,
    related: HashMap<String, RelatedQueries>,
    fail_series: HashSet<String>,
    fail_related: HashSet<String>,
    rate_limit_series: Mutex<u32>,
    series_calls: Mutex<u32>,
    related_calls: Mutex<u32>,
}

impl MockTrendSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_series(mut self, term: &str, values: &[f64]) -> Self {
        self.series.insert(term.to_string(), values.to_vec());
        self
    }

    pub fn on_related(mut self, term: &str, queries: RelatedQueries) -> Self {
        self.related.insert(term.to_string(), queries);
        self
    }

    /// Any series request containing `term` fails with a non-retryable
    /// upstream error (chunk granularity, like the real thing).
    pub fn fail_series_for(mut self, term: &str) -> Self {
        self.fail_series.insert(term.to_string());
        self
    }

    /// Any related request containing `term` fails with a non-retryable
    /// upstream error.
    pub fn fail_related_for(mut self, term: &str) -> Self {
        self.fail_related.insert(term.to_string());
        self
    }

    /// The next `n` series requests answer 429 before real data flows.
    pub fn rate_limit_next_series(self, n: u32) -> Self {
        *self.rate_limit_series.lock().unwrap() = n;
        self
    }

    pub fn series_call_count(&self) -> u32 {
        *self.series_calls.lock().unwrap()
    }

    pub fn related_call_count(&self) -> u32 {
        *self.related_calls.lock().unwrap()
    }

    pub fn total_call_count(&self) -> u32 {
        self.series_call_count() + self.related_call_count()
    }
}

#[async_trait]
impl TrendSource for MockTrendSource {
    async fn interest_over_time(
        &self,
        terms: &[String],
        _geo: &str,
        _timeframe: &str,
    ) -> gtrends_client::Result<HashMap<String, Vec<f64>>> {
        *self.series_calls.lock().unwrap() += 1;

        {
            let mut remaining = self.rate_limit_series.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(TrendsError::RateLimited);
            }
        }

        if terms.iter().any(|t| self.fail_series.contains(t)) {
            return Err(TrendsError::Api {
                status: 500,
                message: "injected series failure".to_string(),
            });
        }

        Ok(terms
            .iter()
            .filter_map(|t| self.series.get(t).map(|v| (t.clone(), v.clone())))
            .collect())
    }

    async fn related_queries(
        &self,
        terms: &[String],
        _geo: &str,
        _timeframe: &str,
    ) -> gtrends_client::Result<HashMap<String, RelatedQueries>> {
        *self.related_calls.lock().unwrap() += 1;

        if terms.iter().any(|t| self.fail_related.contains(t)) {
            return Err(TrendsError::Api {
                status: 500,
                message: "injected related failure".to_string(),
            });
        }

        Ok(terms
            .iter()
            .filter_map(|t| self.related.get(t).map(|q| (t.clone(), q.clone())))
            .collect())
    }
}

/// Shorthand for building a RelatedQueries fixture.
pub fn related(top: &[(&str, i64)], rising: &[(&str, i64)]) -> RelatedQueries {
    let entries = |list: &[(&str, i64)]| {
        list.iter()
            .map(|(query, value)| RelatedEntry {
                query: (*query).to_string(),
                value: *value,
            })
            .collect()
    };
    RelatedQueries {
        top: entries(top),
        rising: entries(rising),
    }
}

// ---------------------------------------------------------------------------
// MemorySnapshotStore
// ---------------------------------------------------------------------------

/// In-memory snapshot store. Append-only like the real table; construct the
/// failing variants to exercise the degradation paths.
pub struct MemorySnapshotStore {
    rows: Mutex<Vec<DiscoverySnapshot>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::new()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// All persisted rows, in insertion order (for test assertions).
    pub fn rows(&self) -> Vec<DiscoverySnapshot> {
        self.rows.lock().unwrap().clone()
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn insert(&self, snapshot: &DiscoverySnapshot) -> Result<()> {
        if self.fail_writes {
            bail!("MemorySnapshotStore: injected write failure");
        }
        self.rows.lock().unwrap().push(snapshot.clone());
        Ok(())
    }

    async fn latest_since(
        &self,
        scenario: &str,
        geo: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<DiscoverySnapshot>> {
        if self.fail_reads {
            bail!("MemorySnapshotStore: injected read failure");
        }
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|s| s.scenario == scenario && s.geo == geo && s.created_at >= cutoff)
            .max_by_key(|s| s.created_at)
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// RecordingSleeper / FixedClock
// ---------------------------------------------------------------------------

/// Sleeper that never waits and records every requested duration.
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Clock pinned to a fixed instant.
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
