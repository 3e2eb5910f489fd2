//! Cache-aside snapshot layer over the persistence store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use trendwatch_common::{DiscoverySnapshot, RelatedKeyword, ScoredKeyword};

use crate::traits::{Clock, SnapshotStore};

pub struct SnapshotCache {
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
}

impl SnapshotCache {
    pub fn new(store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>, ttl: chrono::Duration) -> Self {
        Self { store, clock, ttl }
    }

    /// The freshest snapshot within the TTL window, or a miss. Store
    /// failures degrade to a logged miss; staleness is preferable to
    /// unavailability, and a miss just triggers recomputation.
    pub async fn read(&self, scenario: &str, geo: &str) -> Option<DiscoverySnapshot> {
        let cutoff = self.clock.now() - self.ttl;
        match self.store.latest_since(scenario, geo, cutoff).await {
            Ok(Some(snapshot)) => {
                info!(scenario, geo, created_at = %snapshot.created_at, "Snapshot cache hit");
                Some(snapshot)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(scenario, geo, error = %e, "Snapshot read failed, treating as miss");
                None
            }
        }
    }

    /// Append a snapshot stamped with the current time. A write failure is
    /// logged and swallowed — the freshly computed result is served either
    /// way. Returns the stamp.
    pub async fn write(
        &self,
        scenario: &str,
        geo: &str,
        top_keywords: &[ScoredKeyword],
        related_keywords: &[RelatedKeyword],
    ) -> DateTime<Utc> {
        let created_at = self.clock.now();
        let snapshot = DiscoverySnapshot {
            scenario: scenario.to_string(),
            geo: geo.to_string(),
            top_keywords: top_keywords.to_vec(),
            related_keywords: related_keywords.to_vec(),
            created_at,
        };

        match self.store.insert(&snapshot).await {
            Ok(()) => info!(scenario, geo, "Snapshot cached"),
            Err(e) => {
                warn!(scenario, geo, error = %e, "Snapshot write failed, serving uncached result")
            }
        }
        created_at
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::testing::{FixedClock, MemorySnapshotStore};

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 23, hour, 0, 0).unwrap()
    }

    fn keyword(term: &str) -> ScoredKeyword {
        ScoredKeyword {
            term: term.to_string(),
            score: 42.0,
        }
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = Arc::new(MemorySnapshotStore::new());
        let clock = Arc::new(FixedClock::at(ts(12)));
        let cache = SnapshotCache::new(store, clock, chrono::Duration::days(7));

        let top = vec![keyword("旅遊")];
        let created_at = cache.write("旅遊", "TW", &top, &[]).await;
        assert_eq!(created_at, ts(12));

        let snapshot = cache.read("旅遊", "TW").await.unwrap();
        assert_eq!(snapshot.top_keywords, top);
        assert!(snapshot.related_keywords.is_empty());
    }

    #[tokio::test]
    async fn rows_older_than_ttl_are_misses() {
        let store = Arc::new(MemorySnapshotStore::new());
        let write_clock = Arc::new(FixedClock::at(ts(1)));
        let cache = SnapshotCache::new(
            store.clone(),
            write_clock,
            chrono::Duration::hours(2),
        );
        cache.write("旅遊", "TW", &[keyword("旅遊")], &[]).await;

        // Same store, clock moved 3h past the write.
        let later = SnapshotCache::new(
            store,
            Arc::new(FixedClock::at(ts(4))),
            chrono::Duration::hours(2),
        );
        assert!(later.read("旅遊", "TW").await.is_none());
    }

    #[tokio::test]
    async fn most_recent_row_supersedes_older_ones() {
        let store = Arc::new(MemorySnapshotStore::new());
        let first = SnapshotCache::new(
            store.clone(),
            Arc::new(FixedClock::at(ts(1))),
            chrono::Duration::days(7),
        );
        first.write("旅遊", "TW", &[keyword("舊")], &[]).await;

        let second = SnapshotCache::new(
            store.clone(),
            Arc::new(FixedClock::at(ts(2))),
            chrono::Duration::days(7),
        );
        second.write("旅遊", "TW", &[keyword("新")], &[]).await;

        let snapshot = second.read("旅遊", "TW").await.unwrap();
        assert_eq!(snapshot.top_keywords[0].term, "新");
        // Append-only: the superseded row is still there.
        assert_eq!(store.rows().len(), 2);
    }

    #[tokio::test]
    async fn read_failure_degrades_to_miss() {
        let store = Arc::new(MemorySnapshotStore::failing_reads());
        let cache = SnapshotCache::new(
            store,
            Arc::new(FixedClock::at(ts(12))),
            chrono::Duration::days(7),
        );
        assert!(cache.read("旅遊", "TW").await.is_none());
    }

    #[tokio::test]
    async fn write_failure_still_returns_timestamp() {
        let store = Arc::new(MemorySnapshotStore::failing_writes());
        let cache = SnapshotCache::new(
            store.clone(),
            Arc::new(FixedClock::at(ts(12))),
            chrono::Duration::days(7),
        );
        let created_at = cache.write("旅遊", "TW", &[keyword("旅遊")], &[]).await;
        assert_eq!(created_at, ts(12));
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn keys_are_scoped_by_scenario_and_geo() {
        let store = Arc::new(MemorySnapshotStore::new());
        let cache = SnapshotCache::new(
            store,
            Arc::new(FixedClock::at(ts(12))),
            chrono::Duration::days(7),
        );
        cache.write("旅遊", "TW", &[keyword("旅遊")], &[]).await;

        assert!(cache.read("旅遊", "US").await.is_none());
        assert!(cache.read("健康", "TW").await.is_none());
        assert!(cache.read("旅遊", "TW").await.is_some());
    }
}
