// Trait abstractions for discovery dependencies.
//
// TrendSource — the external trend signal behind one seam; the production
//   impl is an adapter over GtrendsClient.
// SnapshotStore — append-only snapshot persistence (postgres in production,
//   in-memory for tests).
// Sleeper / Clock — injected time, so tests run with zero real delay and
//   assert attempt counts deterministically.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gtrends_client::{GtrendsClient, RelatedQueries};
use trendwatch_common::DiscoverySnapshot;

// ---------------------------------------------------------------------------
// TrendSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Interest-over-time series for a batch of ≤5 terms. Terms the source
    /// has no data for may be absent from the map or carry an empty series.
    async fn interest_over_time(
        &self,
        terms: &[String],
        geo: &str,
        timeframe: &str,
    ) -> gtrends_client::Result<HashMap<String, Vec<f64>>>;

    /// Related-queries listings ("top" and "rising") for a batch of ≤5
    /// terms, keyed by source term.
    async fn related_queries(
        &self,
        terms: &[String],
        geo: &str,
        timeframe: &str,
    ) -> gtrends_client::Result<HashMap<String, RelatedQueries>>;
}

#[async_trait]
impl TrendSource for GtrendsClient {
    async fn interest_over_time(
        &self,
        terms: &[String],
        geo: &str,
        timeframe: &str,
    ) -> gtrends_client::Result<HashMap<String, Vec<f64>>> {
        self.interest_over_time(terms, geo, timeframe).await
    }

    async fn related_queries(
        &self,
        terms: &[String],
        geo: &str,
        timeframe: &str,
    ) -> gtrends_client::Result<HashMap<String, RelatedQueries>> {
        self.related_queries(terms, geo, timeframe).await
    }
}

// ---------------------------------------------------------------------------
// SnapshotStore
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Append one snapshot row. Rows are never updated or deleted.
    async fn insert(&self, snapshot: &DiscoverySnapshot) -> Result<()>;

    /// The most recent row for (scenario, geo) with `created_at` no older
    /// than `cutoff`.
    async fn latest_since(
        &self,
        scenario: &str,
        geo: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<DiscoverySnapshot>>;
}

// ---------------------------------------------------------------------------
// Sleeper / Clock
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed sleeper. Dropping the in-flight future cancels the wait,
/// so a request timeout aborts a discovery mid-pause.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
